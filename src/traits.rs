//! # Cache Trait Hierarchy
//!
//! One capability set shared by every eviction engine, plus policy-specific
//! extensions.
//!
//! ```text
//!                    ┌────────────────────────────────────────┐
//!                    │            CoreCache<K, V>             │
//!                    │                                        │
//!                    │  put(&mut, K, V)                       │
//!                    │  get(&mut, &K) → Option<&V>            │
//!                    │  peek(&, &K) → Option<&V>              │
//!                    │  contains / len / capacity / clear     │
//!                    │  display(&) → String                   │
//!                    └───────────────────┬────────────────────┘
//!                                        │
//!                    ┌───────────────────▼────────────────────┐
//!                    │           MutableCache<K, V>           │
//!                    │  remove(&mut, &K) → Option<V>          │
//!                    └──────────┬──────────────────┬──────────┘
//!                               │                  │
//!              ┌────────────────▼───────┐  ┌───────▼────────────────┐
//!              │  LruCacheTrait<K, V>   │  │  LfuCacheTrait<K, V>   │
//!              │  pop_lru / peek_lru    │  │  pop_lfu / peek_lfu    │
//!              │  touch(&K) → bool      │  │  frequency(&K)         │
//!              │                        │  │  min_frequency()       │
//!              └────────────────────────┘  └────────────────────────┘
//! ```
//!
//! `get` takes `&mut self` on every policy: a hit always updates recency or
//! frequency. Use [`CoreCache::peek`] or [`CoreCache::contains`] to inspect
//! without disturbing eviction order.
//!
//! ## Thread Safety
//!
//! No engine is thread-safe. Because `get` mutates, a shared cache needs an
//! exclusive lock around every call, reads included.

use std::fmt;

/// Operations every cache supports, regardless of eviction policy.
///
/// # Example
///
/// ```
/// use policy_cache::policy::lfu::LfuCache;
/// use policy_cache::policy::lru::LruCache;
/// use policy_cache::traits::CoreCache;
///
/// fn warm<C: CoreCache<i64, i64>>(cache: &mut C, pairs: &[(i64, i64)]) {
///     for &(k, v) in pairs {
///         cache.put(k, v);
///     }
/// }
///
/// let mut lru = LruCache::new(2);
/// let mut lfu = LfuCache::new(2);
/// warm(&mut lru, &[(1, 10), (2, 20), (3, 30)]);
/// warm(&mut lfu, &[(1, 10), (2, 20), (3, 30)]);
/// assert_eq!(lru.len(), 2);
/// assert_eq!(lfu.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or replaces the value for `key`.
    ///
    /// A new key arriving at a full cache first evicts one entry chosen by
    /// the policy. Never fails.
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key`, refreshing its eviction standing.
    ///
    /// `None` means the key is absent; the cache is left untouched in that
    /// case.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns the value for `key` without affecting eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks presence without affecting eviction order.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, fixed at construction.
    fn capacity(&self) -> usize;

    /// Removes every entry.
    fn clear(&mut self);

    /// Human-readable snapshot of the contents in eviction-relevant order.
    ///
    /// Intended for diagnostics and tests; the format is not stable.
    fn display(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display;
}

/// Caches that support removal of an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-specific operations.
///
/// # Example
///
/// ```
/// use policy_cache::policy::lru::LruCache;
/// use policy_cache::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.touch(&"a");
///
/// assert_eq!(cache.peek_lru(), Some((&"b", &2)));
/// assert_eq!(cache.pop_lru(), Some(("b", 2)));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;
}

/// Frequency-specific operations.
///
/// # Example
///
/// ```
/// use policy_cache::policy::lfu::LfuCache;
/// use policy_cache::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache = LfuCache::new(3);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
///
/// assert_eq!(cache.frequency(&"a"), Some(2));
/// assert_eq!(cache.min_frequency(), Some(1));
/// assert_eq!(cache.pop_lfu(), Some(("b", 2)));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the entry the next eviction would pick.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the entry the next eviction would pick.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count of `key`, starting at 1 on insertion.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Lowest frequency currently held; `None` when empty.
    fn min_frequency(&self) -> Option<u64>;
}
