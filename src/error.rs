//! Error types for the LFU cache.
//!
//! - [`CacheError`]: returned by the public cache operations. Lookups on an
//!   absent key and invalid capacities are caller errors and are reported
//!   before the cache is touched.
//! - [`InvariantError`]: returned by
//!   [`LfuCache::check_invariants`](crate::LfuCache::check_invariants) when the
//!   internal bucket and ring structure is inconsistent.
//!
//! # Examples
//!
//! ```
//! use lfu_ring::{CacheError, LfuCache};
//!
//! assert_eq!(
//!     LfuCache::<u32, u32>::new(0).unwrap_err(),
//!     CacheError::InvalidConfiguration("capacity must be at least 1, got 0".into())
//! );
//!
//! let mut cache = LfuCache::new(1).unwrap();
//! cache.put("a", 1);
//! assert_eq!(cache.get(&"b"), Err(CacheError::KeyNotFound));
//! ```

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Result alias used by the fallible cache operations.
pub type Result<T> = core::result::Result<T, CacheError>;

/// Errors reported by [`LfuCache`](crate::LfuCache).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The key is not in the cache.
    #[error("key not found in cache")]
    KeyNotFound,

    /// A capacity below 1 was requested.
    #[error("invalid cache configuration: {0}")]
    InvalidConfiguration(String),
}

/// An internal cache invariant does not hold.
///
/// Carries a description of the first violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cache invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the violation description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
