//! Cache Metrics System
//!
//! Counters maintained by the cache as it runs, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! BTreeMap is used instead of HashMap so that metrics always come out in the
//! same order, which keeps test assertions and logged output reproducible. With
//! a dozen keys the O(log n) lookup cost is irrelevant.
//!
//! Only mutating operations touch the counters. Diagnostics such as
//! `contains`, `frequency`, `peek` or `snapshot` record nothing.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Common counters tracked by the cache
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys inserted by `put`
    pub insertions: u64,

    /// Number of `put` calls that replaced the value of an existing key
    pub updates: u64,

    /// Number of entries evicted to respect the capacity
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup on an absent key.
    ///
    /// Misses are not stored separately; they are `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records the insertion of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replacement on an existing key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records one eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Number of lookups on absent keys.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0, or 0.0 before the
    /// first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0, or 0.0 before the
    /// first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting interface
///
/// Implemented by the cache itself and by its metrics structs so callers can
/// pull a snapshot of counters without knowing the concrete type.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LFU"`
    fn algorithm_name(&self) -> &'static str;
}
