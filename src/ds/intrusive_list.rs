//! Doubly linked list whose nodes live in a [`SlotArena`].
//!
//! Nodes are linked by [`SlotId`] instead of pointers, which keeps the list
//! free of `unsafe` and gives callers a stable handle to hand back for O(1)
//! unlink and move operations.
//!
//! ## Orientation
//!
//! ```text
//!   front (oldest)                               back (newest)
//!   head ─► [id_3] ◄──► [id_0] ◄──► [id_2] ◄── tail
//! ```
//!
//! New nodes are appended at the back. `pop_front` removes the oldest node,
//! `move_to_back` refreshes a node to newest.
//!
//! ## Performance
//! - `push_back` / `pop_front` / `remove` / `move_to_back`: O(1)
//! - `iter`: O(n), front to back

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the oldest value.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Appends `value` as the newest node and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the oldest value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks `id` as the newest node; `false` if `id` is not in the list.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.tail == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from front (oldest) to back (newest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len(),
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = old_tail;
            node.next = None;
        } else {
            return;
        }
        match old_tail.and_then(|t| self.arena.get_mut(t)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Walks the list and verifies back links, the tail pointer and the node
    /// count against the arena.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.arena.is_empty() {
                return Err(InvariantError::new(
                    "list head/tail disagree with an empty arena",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", id.index())))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a stale back link",
                    id.index()
                )));
            }
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("cycle in list"));
            }
            prev = Some(id);
            current = node.next;
        }

        if self.tail != prev {
            return Err(InvariantError::new("tail does not point at the last node"));
        }
        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "walked {count} nodes but arena holds {}",
                self.arena.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn pop_front_removes_oldest() {
        let mut list = IntrusiveList::new();
        list.push_back('a');
        list.push_back('b');
        assert_eq!(list.pop_front(), Some('a'));
        assert_eq!(list.pop_front(), Some('b'));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn move_to_back_from_each_position() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert!(list.move_to_back(b));
        assert_eq!(collect(&list), vec![1, 3, 2]);
        assert!(list.move_to_back(a));
        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert!(list.move_to_back(a));
        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert!(list.move_to_back(c));
        assert_eq!(collect(&list), vec![2, 1, 3]);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(collect(&list), vec![1, 3]);
        assert_eq!(list.remove(c), Some(3));
        assert_eq!(collect(&list), vec![1]);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_back(a));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn slots_are_recycled_after_remove() {
        let mut list = IntrusiveList::with_capacity(2);
        let a = list.push_back(1);
        list.remove(a);
        let b = list.push_back(2);
        assert_eq!(a.index(), b.index());
        assert_eq!(list.get(b), Some(&2));
    }

    #[test]
    fn iter_reports_exact_len() {
        let mut list = IntrusiveList::new();
        for i in 0..5 {
            list.push_back(i);
        }
        assert_eq!(list.iter().len(), 5);
        list.clear();
        assert_eq!(list.iter().len(), 0);
        assert!(list.check_links().is_ok());
    }
}
