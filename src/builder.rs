//! Policy selection and fallible cache construction.
//!
//! [`CacheBuilder::try_build`] is the single entry point a front end needs:
//! it validates the requested capacity, picks the engine for the
//! [`CachePolicy`], and hands back a [`Cache`] that owns it. Replacing a cache
//! means building a new one and dropping the old value; there is no shared
//! global instance.
//!
//! ## Example
//!
//! ```rust
//! use policy_cache::builder::{CacheBuilder, CachePolicy};
//! use policy_cache::traits::CoreCache;
//!
//! let policy: CachePolicy = "lfu".parse()?;
//! let mut cache = CacheBuilder::new(2).try_build::<i64, i64>(policy)?;
//! cache.put(1, 1);
//! cache.put(2, 2);
//! cache.get(&1);
//! cache.put(3, 3);
//! assert_eq!(cache.get(&2), None);
//! # Ok::<(), policy_cache::error::ConfigError>(())
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::CacheMetricsSnapshot;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, recency tie-break.
    Lfu,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Lru => f.write_str("LRU"),
            CachePolicy::Lfu => f.write_str("LFU"),
        }
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            name if name.eq_ignore_ascii_case("lru") => Ok(CachePolicy::Lru),
            name if name.eq_ignore_ascii_case("lfu") => Ok(CachePolicy::Lfu),
            other => Err(ConfigError::UnknownPolicy {
                name: other.to_string(),
            }),
        }
    }
}

/// A cache of either policy behind one API.
///
/// The policy is fixed for the lifetime of the value.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        match &self.inner {
            CacheInner::Lru(lru) => lru.metrics_snapshot(),
            CacheInner::Lfu(lfu) => lfu.metrics_snapshot(),
        }
    }

    /// Runs the engine's structural audit.
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Lfu(lfu) => lfu.check_invariants(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::Lfu(lfu) => lfu.put(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
        }
    }

    fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.peek(key),
            CacheInner::Lfu(lfu) => lfu.peek(key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }

    fn display(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        match &self.inner {
            CacheInner::Lru(lru) => lru.display(),
            CacheInner::Lfu(lfu) => lfu.display(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
        }
    }
}

impl<K, V> fmt::Display for Cache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => fmt::Display::fmt(lru, f),
            CacheInner::Lfu(lfu) => fmt::Display::fmt(lfu, f),
        }
    }
}

/// Builder for [`Cache`] instances.
///
/// Takes the capacity as a signed integer, as received from a front end, so
/// that zero and negative requests are rejected here rather than wrapped.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: i64,
}

impl CacheBuilder {
    pub fn new(capacity: i64) -> Self {
        Self { capacity }
    }

    /// Builds a cache for `policy`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when the capacity is not positive (or
    /// does not fit in `usize`). No cache is created in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use policy_cache::builder::{CacheBuilder, CachePolicy};
    /// use policy_cache::error::ConfigError;
    ///
    /// let lru = CacheBuilder::new(100).try_build::<u64, String>(CachePolicy::Lru);
    /// assert!(lru.is_ok());
    ///
    /// let err = CacheBuilder::new(-1).try_build::<u64, String>(CachePolicy::Lfu);
    /// assert_eq!(err.unwrap_err(), ConfigError::InvalidCapacity { requested: -1 });
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = usize::try_from(self.capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(ConfigError::InvalidCapacity {
                requested: self.capacity,
            })?;

        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(capacity)),
        };
        debug!(%policy, capacity, "built cache");
        Ok(Cache { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICIES: [CachePolicy; 2] = [CachePolicy::Lru, CachePolicy::Lfu];

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(10)
                .try_build::<u64, String>(policy)
                .unwrap();
            assert_eq!(cache.policy(), policy);

            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());
            assert_eq!(cache.get(&1), Some(&"one".to_string()));
            assert_eq!(cache.get(&3), None);
            assert!(cache.contains(&2));
            assert_eq!(cache.peek(&2), Some(&"two".to_string()));
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.capacity(), 10);

            cache.put(1, "ONE".to_string());
            assert_eq!(cache.get(&1), Some(&"ONE".to_string()));

            assert_eq!(cache.remove(&2), Some("two".to_string()));
            cache.clear();
            assert!(cache.is_empty());
            assert!(cache.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_non_positive_capacity_rejected() {
        for policy in POLICIES {
            for requested in [0, -1, i64::MIN] {
                let err = CacheBuilder::new(requested)
                    .try_build::<i64, i64>(policy)
                    .unwrap_err();
                assert_eq!(err, ConfigError::InvalidCapacity { requested });
            }
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(2).try_build::<i64, i64>(policy).unwrap();
            for k in 0..10 {
                cache.put(k, k);
                assert!(cache.len() <= 2);
            }
        }
    }

    #[test]
    fn test_display_delegates_to_engine() {
        let mut lru = CacheBuilder::new(2).try_build::<i64, i64>(CachePolicy::Lru).unwrap();
        let mut lfu = CacheBuilder::new(2).try_build::<i64, i64>(CachePolicy::Lfu).unwrap();
        lru.put(1, 1);
        lfu.put(1, 1);
        assert_eq!(lru.display(), "LRU Cache: [1:1]");
        assert_eq!(lfu.display(), "LFU Cache:\nFreq 1: [1:1]");
        assert_eq!(lfu.to_string(), lfu.display());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("LRU".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
        assert_eq!(" lfu ".parse::<CachePolicy>(), Ok(CachePolicy::Lfu));
        assert_eq!(
            "mru".parse::<CachePolicy>(),
            Err(ConfigError::UnknownPolicy {
                name: "mru".to_string()
            })
        );
        assert_eq!(CachePolicy::Lfu.to_string(), "LFU");
    }
}
