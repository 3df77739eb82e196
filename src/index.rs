//! Entry index: key to entry handle lookup.
//!
//! The index stores [`EntryId`] handles, never the entries themselves; the
//! entries are owned by the bucket list's arena. With the default `hashbrown`
//! feature the map is a `hashbrown::HashMap`, otherwise the standard library's.

use crate::buckets::EntryId;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
pub use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
pub use std::collections::HashMap;

/// Map from key to the handle of its entry.
pub(crate) struct EntryIndex<K, S = DefaultHashBuilder> {
    map: HashMap<K, EntryId, S>,
}

impl<K: Hash + Eq, S: BuildHasher> EntryIndex<K, S> {
    /// Creates an index with room for `capacity` keys.
    ///
    /// One extra slot is reserved for the entry that `put` registers before
    /// evicting.
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        EntryIndex {
            map: HashMap::with_capacity_and_hasher(capacity.saturating_add(1), hash_builder),
        }
    }

    #[inline]
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Registers `key`. Returns the handle previously stored for it, if any.
    #[inline]
    pub(crate) fn insert(&mut self, key: K, id: EntryId) -> Option<EntryId> {
        self.map.insert(key, id)
    }

    #[inline]
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }
}

impl<K, S> EntryIndex<K, S> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys and handles in map order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, EntryId)> + '_ {
        self.map.iter().map(|(key, id)| (key, *id))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use crate::buckets::FrequencyList;
    use alloc::vec::Vec;

    fn handles(n: usize) -> (FrequencyList<u32, u32>, Vec<EntryId>) {
        let mut list = FrequencyList::with_capacity(n);
        let ids = (0..n as u32).map(|k| list.new_entry(k, k)).collect();
        (list, ids)
    }

    #[test]
    fn test_insert_get_remove() {
        let (_list, ids) = handles(2);
        let mut index = EntryIndex::with_capacity_and_hasher(2, DefaultHashBuilder::default());
        assert!(index.is_empty());
        assert_eq!(index.insert("a", ids[0]), None);
        assert_eq!(index.insert("b", ids[1]), None);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a"), Some(ids[0]));
        assert!(index.contains_key("b"));

        assert_eq!(index.remove("a"), Some(ids[0]));
        assert_eq!(index.get("a"), None);
        assert!(!index.contains_key("a"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insert_replaces_handle() {
        let (_list, ids) = handles(2);
        let mut index = EntryIndex::with_capacity_and_hasher(2, DefaultHashBuilder::default());
        index.insert("a", ids[0]);
        assert_eq!(index.insert("a", ids[1]), Some(ids[0]));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_borrowed_lookup() {
        extern crate std;
        use std::string::{String, ToString};

        let (_list, ids) = handles(1);
        let mut index: EntryIndex<String> =
            EntryIndex::with_capacity_and_hasher(1, DefaultHashBuilder::default());
        index.insert("key".to_string(), ids[0]);
        assert_eq!(index.get("key"), Some(ids[0]));
        assert_eq!(index.keys().count(), 1);
        assert_eq!(index.iter().next().map(|(_, id)| id), Some(ids[0]));
        index.clear();
        assert!(index.is_empty());
    }
}
