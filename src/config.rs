//! Cache Configuration
//!
//! Configuration for [`LfuCache`](crate::LfuCache). The struct has a public
//! field for simple instantiation; because the field is a [`NonZeroUsize`] a
//! config value is always valid once it exists, and
//! [`LfuCache::init`](crate::LfuCache::init) cannot fail.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. Memory use is proportional to
//! it: one arena slot per entry, plus one bucket slot and one ring sentinel per
//! distinct frequency currently in use (at most `capacity + 1` of each).
//!
//! # Examples
//!
//! ```
//! use lfu_ring::config::LfuCacheConfig;
//! use lfu_ring::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! // Direct construction
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//! };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap().get(), 100);
//!
//! // Validated construction from a plain integer
//! assert!(LfuCacheConfig::new(0).is_err());
//! let config = LfuCacheConfig::new(8).unwrap();
//! assert_eq!(config.capacity.get(), 8);
//! ```

extern crate alloc;

use crate::error::{CacheError, Result};
use alloc::format;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl LfuCacheConfig {
    /// Builds a config from a plain capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(|capacity| LfuCacheConfig { capacity })
            .ok_or_else(|| {
                CacheError::InvalidConfiguration(format!(
                    "capacity must be at least 1, got {capacity}"
                ))
            })
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
        };
        assert_eq!(config.capacity.get(), 100);
    }

    #[test]
    fn test_lfu_config_new_validates_capacity() {
        assert_eq!(LfuCacheConfig::new(1).unwrap().capacity.get(), 1);
        assert!(matches!(
            LfuCacheConfig::new(0),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }
}
