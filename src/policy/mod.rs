pub mod lfu;
pub mod lru;

/// Most slots an engine reserves at construction. Beyond this the index and
/// arena grow as entries arrive; `capacity` only sets the eviction threshold.
pub(crate) const PREALLOC_LIMIT: usize = 4096;
