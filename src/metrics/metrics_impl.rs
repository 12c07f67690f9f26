use crate::metrics::snapshot::CacheMetricsSnapshot;

/// Running counters for one cache instance.
///
/// Counters are never reset, including by `clear()`.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evictions: u64,
}

impl CacheMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_put_update(&mut self) {
        self.put_calls += 1;
        self.put_updates += 1;
    }

    #[inline]
    pub fn record_put_new(&mut self) {
        self.put_calls += 1;
        self.put_new += 1;
    }

    /// A put that stored nothing (zero capacity).
    #[inline]
    pub fn record_put_rejected(&mut self) {
        self.put_calls += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Copies the counters together with the current gauges.
    pub fn snapshot(&self, len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            put_calls: self.put_calls,
            put_updates: self.put_updates,
            put_new: self.put_new,
            evictions: self.evictions,
            cache_len: len,
            capacity,
        }
    }
}
