//! Circular doubly linked ring stored in an index arena.
//!
//! Every node lives in a `Vec` slot and links to its neighbours by [`NodeId`]
//! instead of by pointer, so a ring can be spliced and unspliced in O(1) without
//! any `unsafe` and without shared ownership cycles. A node that links only to
//! itself is *unlinked*; a sentinel (a node without a payload) that links only to
//! itself marks an *empty* ring.
//!
//! ```text
//!        ┌──────────────────────────────────────────┐
//!        ▼                                          │
//!   [sentinel] ◄──► [node c] ◄──► [node b] ◄──► [node a]
//!      head            newest                  oldest (tail)
//! ```
//!
//! One arena can hold any number of independent rings: each ring is identified
//! by its sentinel (or by any of its members). Freed slots go on a free list and
//! are handed out again by the next allocation, so the arena never grows beyond
//! the peak number of live nodes.
//!
//! This module knows nothing about caching. It is used twice by the LFU cache:
//! once for the list of frequency buckets and once for the entries of every
//! bucket.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Stable handle to a node in a [`Ring`] arena.
///
/// Handles are plain indices. A handle stays valid until the node is released
/// with [`Ring::free`]; after that the slot may be reused by another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot index of this handle.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A ring node: an optional payload plus links to both neighbours.
struct Node<T> {
    /// `None` for sentinels and for slots sitting on the free list.
    val: Option<T>,
    prev: NodeId,
    next: NodeId,
}

/// Arena of circular doubly linked nodes.
pub(crate) struct Ring<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    /// Number of live nodes carrying a payload (sentinels are not counted).
    len: usize,
}

impl<T> Ring<T> {
    /// Creates an empty arena with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Ring {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of live payload nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots ever allocated, including free ones.
    #[inline]
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    fn alloc(&mut self, val: Option<T>) -> NodeId {
        if val.is_some() {
            self.len += 1;
        }
        match self.free.pop() {
            Some(idx) => {
                let id = NodeId(idx);
                let node = &mut self.nodes[idx];
                node.val = val;
                node.prev = id;
                node.next = id;
                id
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Node {
                    val,
                    prev: id,
                    next: id,
                });
                id
            }
        }
    }

    /// Allocates a new sentinel: a self-linked node without payload.
    pub(crate) fn sentinel(&mut self) -> NodeId {
        self.alloc(None)
    }

    /// Allocates a new unlinked node holding `val`.
    ///
    /// The node is not part of any ring until it is passed to
    /// [`insert_after`](Self::insert_after).
    pub(crate) fn add(&mut self, val: T) -> NodeId {
        self.alloc(Some(val))
    }

    /// Unlinks `id` and returns its slot to the free list.
    ///
    /// Returns the payload, or `None` when `id` was a sentinel.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        self.unlink(id);
        let val = self.nodes[id.0].val.take();
        if val.is_some() {
            self.len -= 1;
        }
        self.free.push(id.0);
        val
    }

    /// Splices the unlinked node `node` in immediately after `at`.
    pub(crate) fn insert_after(&mut self, at: NodeId, node: NodeId) {
        debug_assert!(self.is_unlinked(node), "node {node:?} is already in a ring");
        let next = self.nodes[at.0].next;
        {
            let n = &mut self.nodes[node.0];
            n.prev = at;
            n.next = next;
        }
        self.nodes[at.0].next = node;
        self.nodes[next.0].prev = node;
    }

    /// Removes `id` from whatever ring it is in, leaving it self-linked.
    ///
    /// Unlinking a node that is already unlinked does nothing.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id.0].prev, self.nodes[id.0].next);
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
        let n = &mut self.nodes[id.0];
        n.prev = id;
        n.next = id;
    }

    /// Returns `true` if `id` links only to itself.
    ///
    /// For a sentinel this means its ring is empty.
    #[inline]
    pub(crate) fn is_unlinked(&self, id: NodeId) -> bool {
        let n = &self.nodes[id.0];
        n.next == id && n.prev == id
    }

    /// Returns `true` if the ring anchored at `sentinel` holds no other node.
    #[inline]
    pub(crate) fn is_empty(&self, sentinel: NodeId) -> bool {
        self.is_unlinked(sentinel)
    }

    #[inline]
    pub(crate) fn next(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].next
    }

    #[inline]
    pub(crate) fn prev(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].prev
    }

    /// Returns the payload of `id`, or `None` for a sentinel or freed slot.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|n| n.val.as_ref())
    }

    /// Mutable variant of [`get`](Self::get).
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|n| n.val.as_mut())
    }

    /// Iterates the ring anchored at `anchor`, starting with `anchor`'s
    /// successor and stopping before `anchor` comes round again.
    pub(crate) fn iter_after(&self, anchor: NodeId) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            anchor,
            current: self.next(anchor),
            remaining: self.nodes.len(),
        }
    }

    /// Drops every node and every free slot.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("len", &self.len)
            .field("slots", &self.slots())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Iterator over the node handles of one ring, head to tail.
///
/// Bounded by the arena size so that a corrupted ring cannot loop forever.
pub(crate) struct RingIter<'a, T> {
    ring: &'a Ring<T>,
    anchor: NodeId,
    current: NodeId,
    remaining: usize,
}

impl<T> Iterator for RingIter<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == self.anchor || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.current;
        self.current = self.ring.next(id);
        Some(id)
    }
}
