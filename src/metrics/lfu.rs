//! LFU Cache Metrics
//!
//! Frequency-specific counters layered on top of [`CoreCacheMetrics`].

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of promotions (every hit raises a frequency by one)
    pub total_frequency_increments: u64,

    /// Number of frequencies reset to 0 by overwriting a value
    pub frequency_resets: u64,

    /// Highest frequency any entry has reached so far
    pub max_frequency: u64,

    /// Number of frequency buckets currently in the bucket list, zero bucket included
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates zeroed LFU metrics.
    ///
    /// `active_frequency_levels` starts at 1: the zero bucket always exists.
    pub fn new() -> Self {
        Self {
            core: CoreCacheMetrics::new(),
            total_frequency_increments: 0,
            frequency_resets: 0,
            max_frequency: 0,
            active_frequency_levels: 1,
        }
    }

    /// Records a hit that promoted an entry to `new_frequency`.
    pub fn record_frequency_hit(&mut self, new_frequency: u64) {
        self.core.record_hit();
        self.total_frequency_increments += 1;
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    /// Records a lookup on an absent key.
    pub fn record_miss(&mut self) {
        self.core.record_miss();
    }

    /// Records an overwrite that sent an entry from `old_frequency` back to 0.
    pub fn record_frequency_reset(&mut self, old_frequency: u64) {
        self.core.record_update();
        if old_frequency > 0 {
            self.frequency_resets += 1;
        }
    }

    /// Updates the number of buckets currently in use
    pub fn update_active_frequency_levels(&mut self, levels: u64) {
        self.active_frequency_levels = levels;
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert(
            "frequency_resets".to_string(),
            self.frequency_resets as f64,
        );
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );

        metrics
    }
}

impl Default for LfuCacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
