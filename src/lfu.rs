//! Least Frequently Used Cache Implementation.
//!
//! The LFU cache evicts the entry that has been read the fewest times when a new
//! key needs room. Ties are broken by recency: among the entries sharing the
//! lowest frequency, the one least recently inserted or promoted goes first.
//!
//! Frequencies follow three rules:
//!
//! - inserting a new key starts it at frequency 0,
//! - every successful [`get`](LfuCache::get) raises it by exactly 1,
//! - overwriting a key with a *different* value resets it to 0, while writing
//!   the value it already holds is a no-op.
//!
//! Every operation is O(1): entries are grouped in frequency buckets kept in a
//! sorted ring (see the `buckets` module), so neither promotion nor eviction
//! ever searches.
//!
//! The cache does no locking. Wrap it in a mutex to share it between threads.

extern crate alloc;

use crate::buckets::FrequencyList;
use crate::config::LfuCacheConfig;
use crate::error::{CacheError, InvariantError, Result};
use crate::index::{DefaultHashBuilder, EntryIndex, HashMap};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{debug, trace};

/// Upper bound on the number of entries allocated up front. Larger caches
/// grow their index and arena on demand.
const MAX_PREALLOCATED: usize = 1024;

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks the frequency of access for each item and evicts the least
/// frequently used item when a new key arrives at capacity. In case of a tie in
/// frequency, the least recently inserted or promoted item among those with the
/// same frequency is evicted. The item being inserted is never the one evicted.
///
/// # Examples
///
/// ```
/// use lfu_ring::LfuCache;
///
/// let mut cache = LfuCache::new(2).unwrap();
///
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Reading "a" raises its frequency to 1
/// assert_eq!(cache.get(&"a"), Ok(&1));
/// assert_eq!(cache.frequency(&"a"), Ok(1));
///
/// // "b" is the only entry at frequency 0, so it makes room for "c"
/// cache.put("c", 3);
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Map from keys to their entry handles
    index: EntryIndex<K, S>,

    /// Frequency buckets and the entries they hold
    frequencies: FrequencyList<K, V>,

    /// Metrics for tracking hits, misses and frequency movement
    metrics: LfuCacheMetrics,
}

impl<K, V> LfuCache<K, V> {
    /// Creates a new LFU cache holding at most `maxsize` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `maxsize` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ring::LfuCache;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::new(10).unwrap();
    /// assert_eq!(cache.cap().get(), 10);
    /// assert!(LfuCache::<&str, u32>::new(0).is_err());
    /// ```
    pub fn new(maxsize: usize) -> Result<LfuCache<K, V, DefaultHashBuilder>>
    where
        K: Hash + Eq,
    {
        LfuCache::with_hasher(maxsize, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with the specified capacity and hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `maxsize` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ring::LfuCache;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let cache: LfuCache<&str, u32, _> = LfuCache::with_hasher(10, RandomState::new()).unwrap();
    /// assert!(cache.is_empty());
    /// ```
    pub fn with_hasher(maxsize: usize, hash_builder: S) -> Result<Self> {
        let config = LfuCacheConfig::new(maxsize)?;
        Ok(Self::from_parts(config, hash_builder))
    }

    /// Creates a new LFU cache from a validated config.
    ///
    /// Uses `hasher` if given, otherwise `S::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_ring::config::LfuCacheConfig;
    /// use lfu_ring::LfuCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LfuCacheConfig {
    ///     capacity: NonZeroUsize::new(3).unwrap(),
    /// };
    /// let cache: LfuCache<u64, String> = LfuCache::init(config, None);
    /// assert_eq!(cache.cap().get(), 3);
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::from_parts(config, hasher.unwrap_or_default())
    }

    fn from_parts(config: LfuCacheConfig, hash_builder: S) -> Self {
        let capacity = config.capacity.get();
        debug!(capacity, "creating LFU cache");
        let reserved = capacity.min(MAX_PREALLOCATED);
        LfuCache {
            config,
            index: EntryIndex::with_capacity_and_hasher(reserved, hash_builder),
            frequencies: FrequencyList::with_capacity(reserved),
            metrics: LfuCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not count as an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` and raises its frequency by one.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// The entry moves to the head of the bucket for its new frequency, which
    /// makes it the last of its new peers to be evicted.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is not cached; the cache is
    /// left untouched apart from the miss counter.
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(id) = self.index.get(key) else {
            self.metrics.record_miss();
            return Err(CacheError::KeyNotFound);
        };

        let frequency = self.frequencies.promote(id);
        trace!(frequency, "promoted entry");
        self.metrics.record_frequency_hit(frequency);
        self.sync_levels();

        Ok(&self.frequencies[id].value)
    }

    /// Returns the value for `key` without touching its frequency or recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).map(|id| &self.frequencies[id].value)
    }

    /// Returns how many times `key` has been read since it was inserted or
    /// last overwritten with a different value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is not cached.
    pub fn frequency<Q>(&self, key: &Q) -> Result<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index
            .get(key)
            .map(|id| self.frequencies.entry_frequency(id))
            .ok_or(CacheError::KeyNotFound)
    }

    /// Iterates the cached keys in index order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.index.keys()
    }

    /// Iterates the cached key-value pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.index
            .iter()
            .map(move |(key, id)| (key, &self.frequencies[id].value))
    }

    /// Copies every cached key-value pair into a new map.
    pub fn snapshot(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Frequencies of the buckets currently in use, in ascending order.
    ///
    /// The first element is always 0: the zero bucket exists even when empty.
    pub fn frequency_levels(&self) -> Vec<u64> {
        self.frequencies.frequencies()
    }

    /// Clears the cache, removing all key-value pairs.
    ///
    /// Metrics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.frequencies.clear();
        self.sync_levels();
    }

    /// Returns a reference to the metrics for this cache.
    #[inline]
    pub fn lfu_metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    fn sync_levels(&mut self) {
        self.metrics
            .update_active_frequency_levels(self.frequencies.levels() as u64);
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// - A new key enters at frequency 0. If the cache is full, the least
    ///   frequently used entry is evicted first; the new entry is never a
    ///   candidate because it is only linked in after eviction.
    /// - An existing key with an equal value is left exactly as it is.
    /// - An existing key with a different value takes the new value and its
    ///   frequency drops back to 0. Nothing is evicted.
    pub fn put(&mut self, key: K, value: V)
    where
        K: Clone,
        V: PartialEq,
    {
        let zero = self.frequencies.zero();

        if let Some(id) = self.index.get(&key) {
            if self.frequencies[id].value == value {
                return;
            }
            let old_frequency = self.frequencies.entry_frequency(id);
            self.frequencies.detach(id);
            self.frequencies[id].value = value;
            self.frequencies.push_front(zero, id);
            trace!(old_frequency, "overwrote value, frequency reset");
            self.metrics.record_frequency_reset(old_frequency);
            self.sync_levels();
            return;
        }

        // The new entry stays unlinked until eviction is done so that it can
        // never be chosen as the victim.
        let id = self.frequencies.new_entry(key.clone(), value);
        self.index.insert(key, id);
        self.evict_to_capacity();
        self.frequencies.push_front(zero, id);
        self.metrics.core.record_insertion();
        self.sync_levels();
    }

    /// Changes the capacity.
    ///
    /// Shrinking below the current size evicts, lowest frequency and oldest
    /// first, until the cache fits.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `maxsize` is 0; the
    /// cache is left unchanged.
    pub fn resize(&mut self, maxsize: usize) -> Result<()> {
        self.config = LfuCacheConfig::new(maxsize)?;
        debug!(capacity = maxsize, len = self.len(), "resizing LFU cache");
        self.evict_to_capacity();
        self.sync_levels();
        Ok(())
    }

    /// Evicts until `len() <= cap()`.
    ///
    /// Runs at most once per `put` at a fixed capacity, since only one pending
    /// entry can push the cache over.
    fn evict_to_capacity(&mut self) {
        while self.index.len() > self.config.capacity.get() {
            if !self.evict() {
                break;
            }
        }
    }

    /// Removes the oldest entry of the lowest-frequency non-empty bucket.
    ///
    /// Returns `false` if no linked entry exists.
    fn evict(&mut self) -> bool {
        let Some(bucket) = self.frequencies.lowest_non_empty() else {
            return false;
        };
        let frequency = self.frequencies.frequency(bucket);
        let Some(victim) = self.frequencies.tail(bucket) else {
            return false;
        };
        let Some(entry) = self.frequencies.remove(victim) else {
            return false;
        };
        self.index.remove(&entry.key);
        self.metrics.core.record_eviction();
        trace!(frequency, len = self.index.len(), "evicted entry");
        true
    }

    /// Audits the internal structure.
    ///
    /// Verifies that bucket frequencies ascend strictly from a zero bucket,
    /// that only the zero bucket may be empty, that ring links are consistent,
    /// that every entry's bucket reference is correct, that the index and the
    /// rings hold the same entries and that the capacity is respected. O(n).
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> core::result::Result<(), InvariantError> {
        let linked = self.frequencies.validate()?;
        if linked != self.index.len() {
            return Err(InvariantError::new(format!(
                "{} entries linked in buckets, {} indexed",
                linked,
                self.index.len()
            )));
        }
        if self.index.len() > self.config.capacity.get() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.config.capacity
            )));
        }
        for (key, id) in self.index.iter() {
            if self.frequencies[id].key != *key {
                return Err(InvariantError::new(String::from(
                    "index maps a key to another key's entry",
                )));
            }
        }
        Ok(())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.metrics();
        metrics.insert(String::from("capacity"), self.cap().get() as f64);
        metrics.insert(String::from("len"), self.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LfuCache<K, V, S> {
    /// Formats as `LfuCache({key: value [freq=n], ...})` in index order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LfuCache({")?;
        for (i, (key, id)) in self.index.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{:?}: {:?} [freq={}]",
                key,
                self.frequencies[id].value,
                self.frequencies.entry_frequency(id)
            )?;
        }
        f.write_str("})")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;
    use std::string::ToString;
    use std::vec;

    fn cache(cap: usize) -> LfuCache<&'static str, &'static str> {
        LfuCache::new(cap).unwrap()
    }

    #[test]
    fn test_lfu_basic() {
        let mut cache = LfuCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        // Access "a" twice and "b" once
        assert_eq!(cache.get(&"a"), Ok(&1));
        assert_eq!(cache.get(&"a"), Ok(&1));
        assert_eq!(cache.get(&"b"), Ok(&2));

        // "c" is the only entry at frequency 0
        cache.put("d", 4);
        assert!(!cache.contains(&"c"));
        assert_eq!(cache.frequency(&"a"), Ok(2));
        assert_eq!(cache.frequency(&"b"), Ok(1));
        assert_eq!(cache.frequency(&"d"), Ok(0));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lfu_evicts_oldest_among_ties() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.put("C", "c");

        assert!(!cache.contains(&"A"));
        assert_eq!(cache.peek(&"B"), Some(&"b"));
        assert_eq!(cache.peek(&"C"), Some(&"c"));
        assert_eq!(cache.frequency(&"B"), Ok(0));
        assert_eq!(cache.frequency(&"C"), Ok(0));
    }

    #[test]
    fn test_lfu_get_then_overwrite_resets_frequency() {
        let mut cache = cache(1);
        cache.put("A", "a");
        assert_eq!(cache.get(&"A"), Ok(&"a"));
        assert_eq!(cache.frequency(&"A"), Ok(1));

        cache.put("A", "b");
        assert_eq!(cache.peek(&"A"), Some(&"b"));
        assert_eq!(cache.frequency(&"A"), Ok(0));
        assert_eq!(cache.frequency_levels(), vec![0]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lfu_evicts_lowest_frequency() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.get(&"A").unwrap();
        cache.put("C", "c");

        assert!(!cache.contains(&"B"));
        assert_eq!(cache.frequency(&"A"), Ok(1));
        assert_eq!(cache.frequency(&"C"), Ok(0));
    }

    #[test]
    fn test_lfu_same_value_put_is_noop() {
        let mut cache = cache(3);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.put("C", "c");
        cache.get(&"B").unwrap();
        let levels = cache.frequency_levels();

        cache.put("A", "a");
        cache.put("B", "b");

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.frequency(&"A"), Ok(0));
        assert_eq!(cache.frequency(&"B"), Ok(1));
        assert_eq!(cache.frequency_levels(), levels);
        assert_eq!(cache.lfu_metrics().core.updates, 0);
    }

    #[test]
    fn test_lfu_same_value_put_keeps_recency() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        // A is still the oldest at frequency 0 after a no-op put
        cache.put("A", "a");
        cache.put("C", "c");
        assert!(!cache.contains(&"A"));
        assert!(cache.contains(&"B"));
    }

    #[test]
    fn test_lfu_overwrite_moves_to_head_of_zero_bucket() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        // Overwriting A makes it the newest entry at frequency 0
        cache.put("A", "a2");
        cache.put("C", "c");
        assert!(!cache.contains(&"B"));
        assert_eq!(cache.peek(&"A"), Some(&"a2"));
    }

    #[test]
    fn test_lfu_overwrite_does_not_evict() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.put("B", "b2");
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"A"));
        assert_eq!(cache.lfu_metrics().core.evictions, 0);
    }

    #[test]
    fn test_lfu_new_entry_survives_when_all_others_are_hotter() {
        let mut cache = cache(2);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.get(&"A").unwrap();
        cache.get(&"B").unwrap();
        // The zero bucket is empty; the victim comes from frequency 1
        cache.put("C", "c");
        assert!(cache.contains(&"C"));
        assert!(!cache.contains(&"A"));
        assert!(cache.contains(&"B"));
        assert_eq!(cache.frequency_levels(), vec![0, 1]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lfu_capacity_one_always_replaces() {
        let mut cache = cache(1);
        cache.put("A", "a");
        cache.get(&"A").unwrap();
        cache.get(&"A").unwrap();
        cache.put("B", "b");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&"B"));
        assert_eq!(cache.frequency_levels(), vec![0]);
    }

    #[test]
    fn test_lfu_get_missing_key() {
        let mut cache = cache(2);
        cache.put("A", "a");
        assert_eq!(cache.get(&"Z"), Err(CacheError::KeyNotFound));
        assert_eq!(cache.frequency(&"Z"), Err(CacheError::KeyNotFound));
        assert_eq!(cache.frequency(&"A"), Ok(0));
        assert_eq!(cache.lfu_metrics().core.cache_misses(), 1);
    }

    #[test]
    fn test_lfu_huge_capacity_allocates_lazily() {
        let mut cache = LfuCache::new(usize::MAX).unwrap();
        assert_eq!(cache.cap().get(), usize::MAX);
        cache.put(1u32, 1u32);
        assert_eq!(cache.get(&1), Ok(&1));

        let mut cache = LfuCache::new(1usize << 60).unwrap();
        for i in 0..2 * MAX_PREALLOCATED as u32 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 2 * MAX_PREALLOCATED);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lfu_rejects_zero_capacity() {
        assert!(matches!(
            LfuCache::<u32, u32>::new(0),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_lfu_buckets_are_pruned() {
        let mut cache = cache(3);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.get(&"A").unwrap();
        cache.get(&"A").unwrap();
        cache.get(&"B").unwrap();
        assert_eq!(cache.frequency_levels(), vec![0, 1, 2]);
        cache.get(&"B").unwrap();
        assert_eq!(cache.frequency_levels(), vec![0, 2]);
        assert_eq!(cache.lfu_metrics().active_frequency_levels, 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lfu_resize_evicts_down() {
        let mut cache = cache(4);
        for (k, v) in [("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")] {
            cache.put(k, v);
        }
        cache.get(&"A").unwrap();
        cache.get(&"C").unwrap();

        cache.resize(2).unwrap();
        assert_eq!(cache.cap().get(), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"A"));
        assert!(cache.contains(&"C"));
        cache.check_invariants().unwrap();

        assert!(cache.resize(0).is_err());
        assert_eq!(cache.cap().get(), 2);

        cache.resize(3).unwrap();
        cache.put("E", "e");
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lfu_snapshot_iter_and_keys() {
        let mut cache = cache(3);
        cache.put("A", "a");
        cache.put("B", "b");

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("A"), Some(&"a"));
        assert_eq!(snapshot.get("B"), Some(&"b"));

        let mut keys: vec::Vec<_> = cache.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, ["A", "B"]);

        let from_iter: vec::Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        let from_keys: vec::Vec<_> = cache.keys().copied().collect();
        assert_eq!(from_iter, from_keys);
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = cache(3);
        cache.put("A", "a");
        cache.put("B", "b");
        cache.get(&"A").unwrap();

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.frequency_levels(), vec![0]);
        cache.check_invariants().unwrap();

        cache.put("C", "c");
        assert_eq!(cache.get(&"C"), Ok(&"c"));
    }

    #[test]
    fn test_lfu_debug_format() {
        let mut cache = cache(4);
        cache.put("A", "a");
        assert_eq!(format!("{:?}", cache), "LfuCache({\"A\": \"a\" [freq=0]})");
        cache.get(&"A").unwrap();
        assert_eq!(format!("{:?}", cache), "LfuCache({\"A\": \"a\" [freq=1]})");
    }

    #[test]
    fn test_lfu_metrics_report() {
        let mut cache = cache(1);
        cache.put("A", "a");
        cache.get(&"A").unwrap();
        cache.put("B", "b");
        let _ = cache.get(&"A");

        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&2.0));
        assert_eq!(metrics.get("capacity"), Some(&1.0));
        assert_eq!(metrics.get("len"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }

    #[test]
    fn test_lfu_complex_values() {
        #[derive(Debug, Clone, PartialEq)]
        struct ComplexValue {
            id: usize,
            data: std::string::String,
        }

        let mut cache = LfuCache::new(2).unwrap();
        let a = ComplexValue {
            id: 1,
            data: "a-data".to_string(),
        };
        cache.put("a", a.clone());
        cache.get(&"a").unwrap();

        // Equal value: frequency kept
        cache.put("a", a.clone());
        assert_eq!(cache.frequency(&"a"), Ok(1));

        // Different value: frequency reset
        cache.put(
            "a",
            ComplexValue {
                id: 100,
                data: "a-modified".to_string(),
            },
        );
        assert_eq!(cache.frequency(&"a"), Ok(0));
        assert_eq!(cache.peek(&"a").map(|v| v.id), Some(100));
        assert_eq!(cache.peek(&"a").map(|v| v.data.as_str()), Some("a-modified"));
    }

    #[test]
    fn test_lfu_string_keys_borrowed_lookup() {
        let mut cache: LfuCache<std::string::String, u32> = LfuCache::new(2).unwrap();
        cache.put("one".to_string(), 1);
        assert_eq!(cache.get("one"), Ok(&1));
        assert!(cache.contains("one"));
        assert_eq!(cache.frequency("one"), Ok(1));
    }

    #[test]
    fn test_lfu_behind_mutex() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LfuCache::new(100).unwrap()));
        let handles: vec::Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let mut guard = cache.lock().unwrap();
                        guard.put((t, i), i);
                        if i % 3 == 0 {
                            let _ = guard.get(&(t, i));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert_eq!(guard.len(), 100);
        guard.check_invariants().unwrap();
    }
}
