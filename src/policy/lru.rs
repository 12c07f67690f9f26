//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that was touched (inserted or fetched) longest ago.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  LinkedMap<K, V>                                             │   │
//!   │   │                                                              │   │
//!   │   │  FxHashMap<K, SlotId> ──► IntrusiveList<(K, V)>              │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [1:10] ◄──► [4:40] ◄──► [2:20] ◄── tail            │   │
//!   │   │           (LRU)                    (MRU)                     │   │
//!   │   │           evicted first            touched last              │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                                                                      │
//!   │   capacity: usize  (fixed)                                           │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(3, 30) on a full cache (capacity = 3):
//!
//!     Before:  [1:10] ◄──► [4:40] ◄──► [2:20]
//!     1. 3 is new and len == capacity → pop front, evicts 1
//!     2. push (3, 30) at the back
//!     After:   [4:40] ◄──► [2:20] ◄──► [3:30]
//!
//!   put(4, 41) on an existing key:
//!
//!     1. unlink the old (4, 40) node
//!     2. push (4, 41) at the back
//!     After:   [2:20] ◄──► [3:30] ◄──► [4:41]
//!
//!   get(2):
//!
//!     1. move node 2 to the back
//!     After:   [3:30] ◄──► [4:41] ◄──► [2:20]
//! ```
//!
//! ## Operations
//!
//! | Method          | Complexity | Description                               |
//! |-----------------|------------|-------------------------------------------|
//! | `put(k, v)`     | O(1)       | Insert at MRU, evicting the LRU if full   |
//! | `get(&k)`       | O(1)       | Lookup and move to MRU                    |
//! | `peek(&k)`      | O(1)       | Lookup without reordering                 |
//! | `remove(&k)`    | O(1)       | Remove by key                             |
//! | `pop_lru()`     | O(1)       | Remove the LRU entry                      |
//! | `touch(&k)`     | O(1)       | Move to MRU without reading               |
//! | `display()`     | O(n)       | `LRU Cache: [k:v] ...`, LRU first         |
//!
//! ## Capacity
//!
//! [`LruCache::new`] accepts a capacity of zero and then stores nothing.
//! [`LruCache::try_new`] and the builder reject it.
//!
//! ## Thread Safety
//!
//! Not thread-safe. `get` reorders, so shared use needs a `Mutex`, not an
//! `RwLock`.

use std::fmt;
use std::hash::Hash;

use tracing::trace;

use crate::ds::LinkedMap;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::PREALLOC_LIMIT;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Bounded cache with least-recently-used eviction.
///
/// # Example
///
/// ```
/// use policy_cache::policy::lru::LruCache;
/// use policy_cache::traits::CoreCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, 1);
/// cache.put(2, 2);
/// assert_eq!(cache.get(&1), Some(&1));
///
/// cache.put(3, 3); // evicts 2
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.display(), "LRU Cache: [1:1] [3:3]");
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: LinkedMap<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 yields a cache on which every `put` is a no-op.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LinkedMap::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but rejects a zero capacity.
    ///
    /// ```
    /// use policy_cache::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { requested: 0 });
        }
        Ok(Self::new(capacity))
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.entries.iter()
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let evicted = self.entries.pop_front()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        trace!(policy = "lru", capacity = self.capacity, "evicted least recently used entry");
        Some(evicted)
    }

    /// Audits the index and recency list against each other and the
    /// capacity bound. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        self.entries.check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.entries.len(), self.capacity)
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_rejected();
            return;
        }

        if self.entries.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            self.entries.push_back(key, value);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.push_back(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.touch(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.entries.get(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn display(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        self.entries.pop_front()
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries.front()
    }

    fn touch(&mut self, key: &K) -> bool {
        self.entries.touch(key)
    }
}

impl<K, V> fmt::Display for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LRU Cache:")?;
        for (key, value) in self.entries.iter() {
            write!(f, " [{key}:{value}]")?;
        }
        Ok(())
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
