//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the lowest access count. Ties inside the lowest
//! frequency are broken by recency: the key that entered or last touched its
//! tier longest ago goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                            LfuCache<K, V>                                │
//!   │                                                                          │
//!   │   entries: FxHashMap<K, Entry<V>>        (keyMap)                        │
//!   │   ┌─────────┬───────────────────────┐                                    │
//!   │   │   Key   │  value, freq          │                                    │
//!   │   ├─────────┼───────────────────────┤                                    │
//!   │   │    1    │  10, 3                │                                    │
//!   │   │    2    │  20, 1                │                                    │
//!   │   │    5    │  50, 1                │                                    │
//!   │   └─────────┴───────────────────────┘                                    │
//!   │                                                                          │
//!   │   tiers: FxHashMap<u64, Tier<K>>         (freqMap)                       │
//!   │                                                                          │
//!   │   min_freq = 1                                                           │
//!   │       │                                                                  │
//!   │       ▼                                                                  │
//!   │   freq=1: head ──► [2] ◄──► [5] ◄── tail    (LinkedMap<K, ()>)           │
//!   │                 evicted first                                            │
//!   │       │ next                                                             │
//!   │       ▼                                                                  │
//!   │   freq=3: head ──► [1] ◄── tail                                          │
//!   │                                                                          │
//!   │   Tier links: 1 ──next──► 3, 3 ──prev──► 1 (only non-empty tiers)        │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency Bump (get, or put on an existing key)
//!
//! ```text
//!   bump(5):  freq 1 → 2
//!     1. create tier 2 between tier 1 and tier 3 if it does not exist
//!     2. append 5 at the back of tier 2
//!     3. remove 5 from tier 1; an emptied tier is unlinked and, if it was
//!        min_freq, min_freq moves to the next tier (always freq + 1 here)
//! ```
//!
//! ## Eviction (put of a new key on a full cache)
//!
//! ```text
//!     1. pop the front of tier[min_freq]
//!     2. drop it from entries; unlink the tier if it emptied
//!     3. insert the new key at the back of tier 1, min_freq = 1
//! ```
//!
//! `min_freq` is never recomputed by scanning: it follows the tier chain.
//!
//! ## Operations
//!
//! | Method            | Complexity | Description                              |
//! |-------------------|------------|------------------------------------------|
//! | `put(k, v)`       | O(1)*      | Update + bump, or insert at freq 1       |
//! | `get(&k)`         | O(1)*      | Lookup + bump                            |
//! | `peek(&k)`        | O(1)       | Lookup without bump                      |
//! | `remove(&k)`      | O(1)       | Remove by key                            |
//! | `pop_lfu()`       | O(1)       | Remove the next eviction victim          |
//! | `frequency(&k)`   | O(1)       | Current access count                     |
//! | `display()`       | O(n)       | `Freq f: [k:v] ...` per tier, ascending  |
//!
//! \* amortized: creating a tier allocates.
//!
//! ## Capacity
//!
//! A zero-capacity cache built with [`LfuCache::new`] silently ignores
//! every `put`. [`LfuCache::try_new`] and the builder reject it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::LinkedMap;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::PREALLOC_LIMIT;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    freq: u64,
}

/// Keys sharing one frequency, oldest touch first.
#[derive(Debug)]
struct Tier<K> {
    keys: LinkedMap<K, ()>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Bounded cache with least-frequently-used eviction.
///
/// # Example
///
/// ```
/// use policy_cache::policy::lfu::LfuCache;
/// use policy_cache::traits::CoreCache;
///
/// let mut cache = LfuCache::new(2);
/// cache.put(1, 1);
/// cache.put(2, 2);
/// cache.get(&1); // freq(1) = 2
///
/// cache.put(3, 3); // evicts 2, the only key at freq 1
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(&3));
/// assert_eq!(cache.display(), "LFU Cache:\nFreq 2: [1:1] [3:3]");
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    entries: FxHashMap<K, Entry<V>>,
    tiers: FxHashMap<u64, Tier<K>>,
    // 0 while empty
    min_freq: u64,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 yields a cache on which every `put` is a no-op.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(
                capacity.min(PREALLOC_LIMIT),
                Default::default(),
            ),
            tiers: FxHashMap::default(),
            min_freq: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { requested: 0 });
        }
        Ok(Self::new(capacity))
    }

    /// Iterates `(key, value, frequency)` by ascending frequency, oldest
    /// touch first within a frequency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, u64)> + '_ {
        self.tiers_ascending().flat_map(move |(freq, tier)| {
            tier.keys
                .keys()
                .filter_map(move |key| self.entries.get(key).map(|e| (key, &e.value, freq)))
        })
    }

    fn tiers_ascending(&self) -> impl Iterator<Item = (u64, &Tier<K>)> + '_ {
        let mut next = (!self.entries.is_empty()).then_some(self.min_freq);
        std::iter::from_fn(move || {
            let freq = next?;
            let tier = self.tiers.get(&freq)?;
            next = tier.next;
            Some((freq, tier))
        })
    }

    /// Inserts an empty tier for `freq` between `prev` and `next`.
    fn link_tier(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.tiers.insert(
            freq,
            Tier {
                keys: LinkedMap::new(),
                prev,
                next,
            },
        );
        if let Some(p) = prev
            && let Some(tier) = self.tiers.get_mut(&p)
        {
            tier.next = Some(freq);
        }
        if let Some(n) = next
            && let Some(tier) = self.tiers.get_mut(&n)
        {
            tier.prev = Some(freq);
        }
        if prev.is_none() {
            self.min_freq = freq;
        }
    }

    /// Drops the tier for `freq` and splices its neighbours together.
    fn unlink_tier(&mut self, freq: u64) {
        let Some(tier) = self.tiers.remove(&freq) else {
            return;
        };
        if let Some(p) = tier.prev
            && let Some(prev) = self.tiers.get_mut(&p)
        {
            prev.next = tier.next;
        }
        if let Some(n) = tier.next
            && let Some(next) = self.tiers.get_mut(&n)
        {
            next.prev = tier.prev;
        }
        if self.min_freq == freq {
            self.min_freq = tier.next.unwrap_or(0);
        }
    }

    /// Moves `key` from its tier to the back of the next one up and returns
    /// the new frequency.
    fn bump(&mut self, key: &K) -> Option<u64> {
        let entry = self.entries.get_mut(key)?;
        let old = entry.freq;
        let new = old.saturating_add(1);
        if new == old {
            if let Some(tier) = self.tiers.get_mut(&old) {
                tier.keys.touch(key);
            }
            return Some(old);
        }
        entry.freq = new;

        let old_next = self.tiers.get(&old).and_then(|tier| tier.next);
        if old_next != Some(new) {
            self.link_tier(new, Some(old), old_next);
        }
        if let Some(tier) = self.tiers.get_mut(&new) {
            tier.keys.push_back(key.clone(), ());
        }

        let emptied = match self.tiers.get_mut(&old) {
            Some(tier) => {
                tier.keys.remove(key);
                tier.keys.is_empty()
            },
            None => false,
        };
        if emptied {
            self.unlink_tier(old);
        }
        Some(new)
    }

    /// Removes the oldest key of the lowest tier.
    fn evict_min(&mut self) -> Option<(K, V, u64)> {
        let freq = self.min_freq;
        let tier = self.tiers.get_mut(&freq)?;
        let (key, ()) = tier.keys.pop_front()?;
        if tier.keys.is_empty() {
            self.unlink_tier(freq);
        }
        let entry = self.entries.remove(&key)?;
        Some((key, entry.value, freq))
    }

    /// Audits the entry map, the tier chain and `min_freq` against each
    /// other. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }

        if self.entries.is_empty() {
            if self.min_freq != 0 || !self.tiers.is_empty() {
                return Err(InvariantError::new(
                    "empty cache still has tiers or a min_freq",
                ));
            }
            return Ok(());
        }

        let true_min = self.entries.values().map(|e| e.freq).min().unwrap_or(0);
        if self.min_freq != true_min {
            return Err(InvariantError::new(format!(
                "min_freq is {} but the lowest stored frequency is {true_min}",
                self.min_freq
            )));
        }
        match self.tiers.get(&self.min_freq) {
            Some(head) if head.prev.is_none() => {},
            _ => {
                return Err(InvariantError::new(format!(
                    "min_freq {} is not the head of the tier chain",
                    self.min_freq
                )));
            },
        }

        let mut seen_tiers = 0usize;
        let mut seen_keys = 0usize;
        let mut prev: Option<u64> = None;
        for (freq, tier) in self.tiers_ascending() {
            if tier.prev != prev {
                return Err(InvariantError::new(format!("tier {freq} has a stale prev link")));
            }
            if prev.is_some_and(|p| p >= freq) {
                return Err(InvariantError::new(format!("tier {freq} is out of order")));
            }
            if tier.keys.is_empty() {
                return Err(InvariantError::new(format!("tier {freq} is empty but linked")));
            }
            tier.keys.check_invariants()?;
            for key in tier.keys.keys() {
                match self.entries.get(key) {
                    Some(entry) if entry.freq == freq => {},
                    _ => {
                        return Err(InvariantError::new(format!(
                            "tier {freq} holds a key whose entry disagrees"
                        )));
                    },
                }
            }
            seen_tiers += 1;
            seen_keys += tier.keys.len();
            prev = Some(freq);
        }

        if seen_tiers != self.tiers.len() {
            return Err(InvariantError::new(format!(
                "chain reaches {seen_tiers} tiers of {}",
                self.tiers.len()
            )));
        }
        if seen_keys != self.entries.len() {
            return Err(InvariantError::new(format!(
                "tiers hold {seen_keys} keys but {} entries exist",
                self.entries.len()
            )));
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.entries.len(), self.capacity)
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_rejected();
            return;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            self.bump(&key);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.entries.len() >= self.capacity
            && let Some((_, _, freq)) = self.evict_min()
        {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            trace!(policy = "lfu", freq, capacity = self.capacity, "evicted least frequently used entry");
        }

        if !self.tiers.contains_key(&1) {
            let head = (self.min_freq != 0).then_some(self.min_freq);
            self.link_tier(1, None, head);
        }
        if let Some(tier) = self.tiers.get_mut(&1) {
            tier.keys.push_back(key.clone(), ());
        }
        self.entries.insert(key, Entry { value, freq: 1 });
        self.min_freq = 1;
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.bump(key).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.entries.get(key).map(|e| &e.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.tiers.clear();
        self.min_freq = 0;
    }

    fn display(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        let emptied = match self.tiers.get_mut(&entry.freq) {
            Some(tier) => {
                tier.keys.remove(key);
                tier.keys.is_empty()
            },
            None => false,
        };
        if emptied {
            self.unlink_tier(entry.freq);
        }
        Some(entry.value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        self.evict_min().map(|(key, value, _)| (key, value))
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (key, _) = self.tiers.get(&self.min_freq)?.keys.front()?;
        self.entries.get(key).map(|e| (key, &e.value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|e| e.freq)
    }

    fn min_frequency(&self) -> Option<u64> {
        (!self.entries.is_empty()).then_some(self.min_freq)
    }
}

impl<K, V> fmt::Display for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LFU Cache:")?;
        for (freq, tier) in self.tiers_ascending() {
            write!(f, "\nFreq {freq}:")?;
            for key in tier.keys.keys() {
                if let Some(entry) = self.entries.get(key) {
                    write!(f, " [{key}:{}]", entry.value)?;
                }
            }
        }
        Ok(())
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
