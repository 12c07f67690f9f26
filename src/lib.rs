//! policy-cache: bounded key-value caches with O(1) LRU and LFU eviction.
//!
//! - [`policy::lru::LruCache`] evicts the least recently touched entry.
//! - [`policy::lfu::LfuCache`] evicts the least frequently used entry,
//!   oldest touch first among equals.
//! - [`builder::CacheBuilder`] validates a capacity and builds either one
//!   behind [`builder::Cache`].
//!
//! Both engines are built from [`ds::LinkedMap`], a hash index over an
//! arena-backed doubly linked list.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
