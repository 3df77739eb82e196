//! Frequency bucket list.
//!
//! Entries that share an access frequency are grouped in a *bucket*. Buckets
//! form a ring in strictly ascending frequency order, anchored by a permanent
//! bucket for frequency 0. Every bucket in turn anchors a ring of its entries,
//! newest at the head and oldest at the tail:
//!
//! ```text
//!              frequencies
//!      ┌──► [0] ◄──► [1] ◄──► [4] ◄──► [7] ◄──┐
//!      │     │        │        │        │     │
//!      │    <C>      <E>      <F>      <H>    │   head: last inserted or promoted
//!      │     │        │                 │     │
//!      │    <B>      <D>               <G>    │
//!      │     │                                │
//!      │    <A>                               │   tail: oldest, evicted first
//!      └──────────────────────────────────────┘
//! ```
//!
//! Entries only ever move from frequency `f` to `f + 1` (on access) or back to 0
//! (on overwrite), so keeping the list sorted never needs a search: the bucket
//! for `f + 1` is either the immediate successor of the bucket for `f` or does
//! not exist yet.
//!
//! Both the buckets and the entries live in [`Ring`] arenas and refer to each
//! other through [`BucketId`] / [`EntryId`] handles. An entry's ring sentinel is
//! a payload-less node in the entry arena, owned by its bucket.

extern crate alloc;

use crate::error::InvariantError;
use crate::ring::{NodeId, Ring};
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use tracing::trace;

/// Handle to a cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EntryId(NodeId);

/// Handle to a frequency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BucketId(NodeId);

/// One cached key-value pair.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Bucket whose ring currently holds this entry.
    bucket: BucketId,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn bucket(&self) -> BucketId {
        self.bucket
    }
}

/// All entries sharing one frequency.
struct Bucket {
    frequency: u64,
    /// Sentinel of this bucket's entry ring, allocated in the entry arena.
    entries: NodeId,
}

/// The frequency bucket list together with every bucket's entry ring.
pub(crate) struct FrequencyList<K, V> {
    buckets: Ring<Bucket>,
    entries: Ring<Entry<K, V>>,
    zero: BucketId,
}

impl<K, V> FrequencyList<K, V> {
    /// Creates a bucket list holding only the zero bucket.
    ///
    /// `capacity` pre-sizes the entry arena.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut buckets = Ring::with_capacity(4);
        let mut entries = Ring::with_capacity(capacity.saturating_add(1));
        let zero = Self::new_zero_bucket(&mut buckets, &mut entries);
        FrequencyList {
            buckets,
            entries,
            zero,
        }
    }

    fn new_zero_bucket(buckets: &mut Ring<Bucket>, entries: &mut Ring<Entry<K, V>>) -> BucketId {
        let sentinel = entries.sentinel();
        BucketId(buckets.add(Bucket {
            frequency: 0,
            entries: sentinel,
        }))
    }

    /// The permanent frequency-0 bucket.
    #[inline]
    pub(crate) fn zero(&self) -> BucketId {
        self.zero
    }

    fn bucket(&self, id: BucketId) -> &Bucket {
        match self.buckets.get(id.0) {
            Some(bucket) => bucket,
            None => panic!("stale bucket handle at slot {}", id.0.index()),
        }
    }

    /// Returns the frequency of `bucket`.
    #[inline]
    pub(crate) fn frequency(&self, bucket: BucketId) -> u64 {
        self.bucket(bucket).frequency
    }

    /// Returns the frequency of the bucket currently holding `entry`.
    #[inline]
    pub(crate) fn entry_frequency(&self, entry: EntryId) -> u64 {
        self.frequency(self[entry].bucket())
    }

    /// Number of buckets in the list, zero bucket included.
    #[inline]
    pub(crate) fn levels(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if `bucket`'s entry ring is empty.
    #[inline]
    pub(crate) fn is_bucket_empty(&self, bucket: BucketId) -> bool {
        self.entries.is_empty(self.bucket(bucket).entries)
    }

    /// Allocates an entry that is not yet linked into any bucket.
    ///
    /// Its bucket reference points at the zero bucket, where
    /// [`push_front`](Self::push_front) is expected to put it.
    pub(crate) fn new_entry(&mut self, key: K, value: V) -> EntryId {
        EntryId(self.entries.add(Entry {
            key,
            value,
            bucket: self.zero,
        }))
    }

    /// Returns the bucket for `bucket.frequency + 1`, creating it right after
    /// `bucket` when the successor has a different frequency.
    pub(crate) fn get_or_create_next(&mut self, bucket: BucketId) -> BucketId {
        let target = self.frequency(bucket) + 1;
        let next = BucketId(self.buckets.next(bucket.0));
        if next != self.zero && self.frequency(next) == target {
            return next;
        }
        let sentinel = self.entries.sentinel();
        let created = BucketId(self.buckets.add(Bucket {
            frequency: target,
            entries: sentinel,
        }));
        self.buckets.insert_after(bucket.0, created.0);
        trace!(frequency = target, "created frequency bucket");
        created
    }

    /// Unlinks `bucket` from the list and frees it if it is empty and not the
    /// zero bucket. Returns `true` if the bucket was removed.
    pub(crate) fn prune_if_empty(&mut self, bucket: BucketId) -> bool {
        if bucket == self.zero || !self.is_bucket_empty(bucket) {
            return false;
        }
        if let Some(removed) = self.buckets.free(bucket.0) {
            self.entries.free(removed.entries);
            trace!(frequency = removed.frequency, "pruned empty frequency bucket");
        }
        true
    }

    /// Links the unlinked `entry` at the head of `bucket`'s ring and points its
    /// bucket reference at `bucket`.
    pub(crate) fn push_front(&mut self, bucket: BucketId, entry: EntryId) {
        let sentinel = self.bucket(bucket).entries;
        self.entries.insert_after(sentinel, entry.0);
        self[entry].bucket = bucket;
    }

    /// Unlinks `entry` from its bucket's ring and prunes the bucket if that
    /// left it empty. The entry keeps its (now stale) bucket reference until it
    /// is pushed somewhere else.
    pub(crate) fn detach(&mut self, entry: EntryId) {
        let bucket = self[entry].bucket;
        self.entries.unlink(entry.0);
        self.prune_if_empty(bucket);
    }

    /// Moves `entry` from frequency `f` to `f + 1` and returns the new frequency.
    ///
    /// The destination bucket is resolved before the entry leaves its old
    /// bucket, so the old bucket is still in the list to anchor the new one.
    pub(crate) fn promote(&mut self, entry: EntryId) -> u64 {
        let current = self[entry].bucket;
        let target = self.get_or_create_next(current);
        self.detach(entry);
        self.push_front(target, entry);
        self.frequency(target)
    }

    /// Returns the lowest-frequency non-empty bucket, or `None` when every
    /// linked entry ring is empty.
    ///
    /// Only the zero bucket may be empty, so the answer is either the zero
    /// bucket or its successor.
    pub(crate) fn lowest_non_empty(&self) -> Option<BucketId> {
        if !self.is_bucket_empty(self.zero) {
            return Some(self.zero);
        }
        let next = BucketId(self.buckets.next(self.zero.0));
        if next == self.zero || self.is_bucket_empty(next) {
            None
        } else {
            Some(next)
        }
    }

    /// Returns the oldest entry of `bucket`, or `None` if the bucket is empty.
    pub(crate) fn tail(&self, bucket: BucketId) -> Option<EntryId> {
        let sentinel = self.bucket(bucket).entries;
        if self.entries.is_empty(sentinel) {
            None
        } else {
            Some(EntryId(self.entries.prev(sentinel)))
        }
    }

    /// Detaches `entry`, frees its slot and returns the entry.
    pub(crate) fn remove(&mut self, entry: EntryId) -> Option<Entry<K, V>> {
        self.detach(entry);
        self.entries.free(entry.0)
    }

    /// Bucket frequencies in list order, starting with the zero bucket.
    pub(crate) fn frequencies(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(self.levels());
        out.push(0);
        out.extend(
            self.buckets
                .iter_after(self.zero.0)
                .filter_map(|id| self.buckets.get(id))
                .map(|bucket| bucket.frequency),
        );
        out
    }

    /// Drops every entry and every bucket but a fresh zero bucket.
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.entries.clear();
        self.zero = Self::new_zero_bucket(&mut self.buckets, &mut self.entries);
    }

    /// Audits the bucket list and every entry ring.
    ///
    /// Checks that frequencies ascend strictly from the zero bucket, that only
    /// the zero bucket may be empty, that ring links are symmetric and that every
    /// entry's bucket reference names the bucket whose ring holds it. Returns
    /// the number of linked entries.
    pub(crate) fn validate(&self) -> Result<usize, InvariantError> {
        if self.frequency(self.zero) != 0 {
            return Err(InvariantError::new(format!(
                "zero bucket has frequency {}",
                self.frequency(self.zero)
            )));
        }

        let mut linked = 0;
        let mut levels = 0;
        let mut previous: Option<u64> = None;
        let mut id = self.zero;
        loop {
            let bucket = self.buckets.get(id.0).ok_or_else(|| {
                InvariantError::new(format!("bucket list links to a freed slot {:?}", id))
            })?;
            if let Some(prev) = previous {
                if bucket.frequency <= prev {
                    return Err(InvariantError::new(format!(
                        "bucket frequency {} follows {}",
                        bucket.frequency, prev
                    )));
                }
            }
            if self.buckets.prev(self.buckets.next(id.0)) != id.0 {
                return Err(InvariantError::new(format!(
                    "asymmetric bucket links at frequency {}",
                    bucket.frequency
                )));
            }
            if id != self.zero && self.entries.is_empty(bucket.entries) {
                return Err(InvariantError::new(format!(
                    "bucket for frequency {} is empty",
                    bucket.frequency
                )));
            }
            linked += self.validate_ring(id, bucket)?;
            previous = Some(bucket.frequency);
            levels += 1;

            id = BucketId(self.buckets.next(id.0));
            if id == self.zero {
                break;
            }
            if levels > self.buckets.len() {
                return Err(InvariantError::new("bucket list does not close"));
            }
        }

        if levels != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} buckets reachable, {} allocated",
                levels,
                self.buckets.len()
            )));
        }
        Ok(linked)
    }

    fn validate_ring(&self, id: BucketId, bucket: &Bucket) -> Result<usize, InvariantError> {
        let mut count = 0;
        let mut node = bucket.entries;
        loop {
            let next = self.entries.next(node);
            if self.entries.prev(next) != node {
                return Err(InvariantError::new(format!(
                    "asymmetric entry links in bucket for frequency {}",
                    bucket.frequency
                )));
            }
            if next == bucket.entries {
                return Ok(count);
            }
            let entry = self.entries.get(next).ok_or_else(|| {
                InvariantError::new(format!(
                    "entry ring for frequency {} reaches a sentinel or freed slot",
                    bucket.frequency
                ))
            })?;
            if entry.bucket != id {
                return Err(InvariantError::new(format!(
                    "entry in bucket for frequency {} points at bucket for frequency {}",
                    bucket.frequency,
                    self.buckets
                        .get(entry.bucket.0)
                        .map_or(u64::MAX, |b| b.frequency)
                )));
            }
            count += 1;
            if count > self.entries.len() {
                return Err(InvariantError::new(format!(
                    "entry ring for frequency {} does not close",
                    bucket.frequency
                )));
            }
            node = next;
        }
    }
}

impl<K, V> Index<EntryId> for FrequencyList<K, V> {
    type Output = Entry<K, V>;

    fn index(&self, id: EntryId) -> &Entry<K, V> {
        match self.entries.get(id.0) {
            Some(entry) => entry,
            None => panic!("stale entry handle at slot {}", id.0.index()),
        }
    }
}

impl<K, V> IndexMut<EntryId> for FrequencyList<K, V> {
    fn index_mut(&mut self, id: EntryId) -> &mut Entry<K, V> {
        match self.entries.get_mut(id.0) {
            Some(entry) => entry,
            None => panic!("stale entry handle at slot {}", id.0.index()),
        }
    }
}

impl<K, V> fmt::Debug for FrequencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyList")
            .field("levels", &self.frequencies())
            .field("entries", &self.entries.len())
            .finish()
    }
}
