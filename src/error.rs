//! Error types for the policy-cache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache cannot be constructed from the
//!   requested parameters (non-positive capacity, unknown policy name).
//! - [`InvariantError`]: Returned by `check_invariants` when the internal
//!   structures of an engine disagree with each other.
//!
//! A lookup miss is not an error: `get` returns `None`.
//!
//! ## Example Usage
//!
//! ```
//! use policy_cache::builder::{CacheBuilder, CachePolicy};
//! use policy_cache::error::ConfigError;
//!
//! let cache = CacheBuilder::new(8).try_build::<i64, i64>(CachePolicy::Lru);
//! assert!(cache.is_ok());
//!
//! let bad = CacheBuilder::new(0).try_build::<i64, i64>(CachePolicy::Lfu);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { requested: 0 });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache construction parameters are invalid.
///
/// Produced by [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build)
/// and the engines' `try_new` constructors. No cache instance exists when this
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity was zero or negative.
    InvalidCapacity { requested: i64 },
    /// A policy name did not match any known policy.
    UnknownPolicy { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity { requested } => {
                write!(f, "capacity must be > 0 (got {requested})")
            },
            ConfigError::UnknownPolicy { name } => {
                write!(f, "unknown cache policy `{name}` (expected LRU or LFU)")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
