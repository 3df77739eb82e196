//! # lfu-ring
//!
//! A Least Frequently Used cache where `get`, `put` and eviction all run in
//! constant time.
//!
//! ## How it works
//!
//! Entries are grouped by access frequency into buckets. The buckets form a
//! circular list kept in ascending frequency order, anchored on a permanent
//! bucket for frequency 0. Inside each bucket, entries form their own circular
//! list ordered from most to least recently inserted or promoted.
//!
//! ```text
//!   bucket ring (ascending frequency)
//!  ┌──────────────────────────────────────────────────────┐
//!  │                                                      │
//!  └─▶ [freq 0] ─────▶ [freq 1] ─────▶ [freq 4] ──────────┘
//!        │                │               │
//!        ▼                ▼               ▼
//!      head: e          head: b         head: a
//!            d                c
//!      tail: f          tail: g
//!
//!   index: key ──▶ entry handle
//! ```
//!
//! - A `get` moves the entry from its bucket to the head of the bucket for the
//!   next frequency, creating that bucket directly after the current one if
//!   needed and dropping the old bucket if it is left empty.
//! - A `put` of a new key places it at the head of the frequency-0 bucket.
//! - When the cache is full, the victim is the tail of the lowest non-empty
//!   bucket, which is always either the frequency-0 bucket or its successor.
//!
//! None of these steps search, so every operation is O(1).
//!
//! ## Example
//!
//! ```rust
//! use lfu_ring::{CacheError, LfuCache};
//!
//! let mut cache = LfuCache::new(2).unwrap();
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 {
//!     cache.get(&"popular").unwrap();
//! }
//!
//! cache.put("new", 3); // "rare" evicted (lowest frequency)
//! assert_eq!(cache.get(&"rare"), Err(CacheError::KeyNotFound));
//! assert_eq!(cache.frequency(&"popular"), Ok(10));
//! ```
//!
//! ## Frequency rules
//!
//! | Operation | Effect on frequency |
//! |-----------|---------------------|
//! | `put` of a new key | starts at 0 |
//! | `get` hit | +1 |
//! | `put` with an equal value | unchanged, recency unchanged |
//! | `put` with a different value | reset to 0 |
//!
//! ## Features
//!
//! - `hashbrown` (default): use `hashbrown::HashMap` for the key index, which
//!   keeps the crate `no_std` (it still needs `alloc`).
//! - `std`: link the standard library. Without `hashbrown`, the index falls
//!   back to `std::collections::HashMap`.
//!
//! ## Modules
//!
//! - [`lfu`]: the cache itself
//! - [`config`]: capacity configuration
//! - [`error`]: error types
//! - [`metrics`]: counters for hits, misses, evictions and frequency movement

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown"), test))]
extern crate std;

/// Arena-backed circular doubly linked lists.
///
/// Internal infrastructure. Nodes are addressed by index handles, so no
/// unsafe code or reference counting is involved.
pub(crate) mod ring;

/// Frequency buckets and the entries they hold.
pub(crate) mod buckets;

/// Key to entry handle lookup.
pub(crate) mod index;

/// Cache configuration.
pub mod config;

/// Error types returned by cache operations.
pub mod error;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used item
/// when capacity is reached, in O(1).
pub mod lfu;

/// Cache metrics system.
///
/// Counters for lookups, insertions and evictions, plus LFU-specific
/// frequency statistics, reported through a common trait.
pub mod metrics;

pub use config::LfuCacheConfig;
pub use error::{CacheError, InvariantError, Result};
pub use index::{DefaultHashBuilder, HashMap};
pub use lfu::LfuCache;
pub use metrics::{CacheMetrics, CoreCacheMetrics, LfuCacheMetrics};
