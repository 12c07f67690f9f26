//! Insertion-ordered hash map with O(1) move-to-back.
//!
//! `LinkedMap` pairs an `FxHashMap<K, SlotId>` index with an
//! [`IntrusiveList`] holding the `(key, value)` pairs. The list order is the
//! recency order: front is the least recently touched entry, back the most
//! recently touched one.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          order: IntrusiveList<(K, V)>
//!   ┌─────┬────────┐
//!   │  7  │  id_1  │──────┐
//!   │  3  │  id_0  │──┐   │      front                         back
//!   │  9  │  id_2  │─┐│   │      head ─► [3:30] ◄──► [7:70] ◄──► [9:90] ◄── tail
//!   └─────┴────────┘ ││   │               id_0        id_1        id_2
//!                    │└───┼──────────────►▲           ▲           ▲
//!                    │    └───────────────┼───────────┘           │
//!                    └────────────────────┼───────────────────────┘
//! ```
//!
//! The LRU engine uses one `LinkedMap<K, V>` as its whole state. The LFU
//! engine uses one `LinkedMap<K, ()>` per frequency tier.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

#[derive(Debug)]
pub struct LinkedMap<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<(K, V)>,
}

impl<K, V> LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            order: IntrusiveList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up `key` without changing its position.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|(_, v)| v)
    }

    /// Moves `key` to the back. Returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_back(id),
            None => false,
        }
    }

    /// Inserts `(key, value)` at the back.
    ///
    /// An existing entry for `key` is unlinked first, so the key always ends
    /// up newest. Returns the value it replaced.
    pub fn push_back(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.remove(&key);
        let id = self.order.push_back((key.clone(), value));
        self.index.insert(key, id);
        previous
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|(_, v)| v)
    }

    /// Removes and returns the oldest entry.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_front()?;
        self.index.remove(&key);
        Some((key, value))
    }

    /// Returns the oldest entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.order.front().map(|(k, v)| (k, v))
    }

    /// Iterates entries oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|(k, v)| (k, v))
    }

    /// Iterates keys oldest first.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.order.iter().map(|(k, _)| k)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Verifies that the index and the order list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_links()?;
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but order list holds {}",
                self.index.len(),
                self.order.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some((stored, _)) if stored == key => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "index entry points at slot {} holding a different key",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<K, V> Default for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &LinkedMap<u32, u32>) -> Vec<u32> {
        map.keys().copied().collect()
    }

    #[test]
    fn push_back_orders_oldest_first() {
        let mut map = LinkedMap::new();
        assert_eq!(map.push_back(1, 10), None);
        assert_eq!(map.push_back(2, 20), None);
        assert_eq!(map.push_back(3, 30), None);
        assert_eq!(keys(&map), vec![1, 2, 3]);
        assert_eq!(map.front(), Some((&1, &10)));
    }

    #[test]
    fn push_back_existing_key_moves_and_replaces() {
        let mut map = LinkedMap::new();
        map.push_back(1, 10);
        map.push_back(2, 20);
        assert_eq!(map.push_back(1, 11), Some(10));
        assert_eq!(keys(&map), vec![2, 1]);
        assert_eq!(map.get(&1), Some(&11));
        assert_eq!(map.len(), 2);
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn touch_moves_to_back_without_changing_value() {
        let mut map = LinkedMap::new();
        map.push_back(1, 10);
        map.push_back(2, 20);
        map.push_back(3, 30);
        assert!(map.touch(&1));
        assert_eq!(keys(&map), vec![2, 3, 1]);
        assert_eq!(map.get(&1), Some(&10));
        assert!(!map.touch(&42));
    }

    #[test]
    fn get_does_not_reorder() {
        let mut map = LinkedMap::new();
        map.push_back(1, 10);
        map.push_back(2, 20);
        assert_eq!(map.get(&1), Some(&10));
        assert_eq!(keys(&map), vec![1, 2]);
    }

    #[test]
    fn pop_front_and_remove_keep_index_in_sync() {
        let mut map = LinkedMap::with_capacity(4);
        for k in 1..=4 {
            map.push_back(k, k * 10);
        }
        assert_eq!(map.pop_front(), Some((1, 10)));
        assert!(!map.contains(&1));
        assert_eq!(map.remove(&3), Some(30));
        assert_eq!(map.remove(&3), None);
        assert_eq!(keys(&map), vec![2, 4]);
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn unit_values_work_as_ordered_set() {
        let mut set: LinkedMap<&str, ()> = LinkedMap::new();
        set.push_back("a", ());
        set.push_back("b", ());
        set.touch(&"a");
        assert_eq!(set.pop_front(), Some(("b", ())));
        assert_eq!(set.pop_front(), Some(("a", ())));
        assert!(set.is_empty());
        assert_eq!(set.pop_front(), None);
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut map = LinkedMap::new();
        map.push_back(1, 1);
        map.push_back(2, 2);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().len(), 0);
        assert!(map.check_invariants().is_ok());
    }
}
