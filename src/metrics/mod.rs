//! Per-engine operation counters, compiled in with the `metrics` feature.
//!
//! Each engine owns a [`CacheMetrics`] and bumps it inline; callers read a
//! copy through `metrics_snapshot()`.
//!
//! ```
//! use policy_cache::policy::lru::LruCache;
//! use policy_cache::traits::CoreCache;
//!
//! let mut cache = LruCache::new(1);
//! cache.put(1, 10);
//! cache.put(2, 20);
//! cache.get(&1);
//! cache.get(&2);
//!
//! let snap = cache.metrics_snapshot();
//! assert_eq!(snap.evictions, 1);
//! assert_eq!(snap.get_hits, 1);
//! assert_eq!(snap.get_misses, 1);
//! assert_eq!(snap.hit_rate(), 0.5);
//! ```

pub mod metrics_impl;
pub mod snapshot;

pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
