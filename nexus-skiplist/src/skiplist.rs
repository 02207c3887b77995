//! Skip list - an ordered run queue backed by external storage.
//!
//! Entries are ordered by a `u64` key, duplicates allowed. The list is built
//! for the dispatcher pattern: take the smallest entry often, and cancel
//! arbitrary entries that were located once at insertion time.
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `first` / `last` | O(1) |
//! | `try_insert` | O(log n) expected |
//! | `remove` by handle | O(level + 1), no search |
//! | `pop_first` | O(level + 1) |
//!
//! # Design
//!
//! Every level is a circular doubly-linked chain through the list header.
//! The header lives inline in [`SkipList`]; in node links it is spelled
//! [`Index::HEADER`], so "the header's successor is the header" is "`head[i]`
//! is `HEADER`".
//!
//! ```text
//! Level 2:  HDR ─────────────────────► 50 ─────────────────► HDR
//! Level 1:  HDR ──────────► 20 ──────► 50 ─────────────────► HDR
//! Level 0:  HDR ──► 10 ──► 20 ──► 30 ► 50 ──► 50' ──► 60 ──► HDR
//! ```
//!
//! Every forward arrow has a matching backward arrow (omitted above), which is
//! what lets [`SkipList::remove`] unlink a node from its own links alone.
//! Equal keys sit in insertion order: `50'` was inserted after `50`.
//!
//! # Example
//!
//! ```rust
//! use nexus_skiplist::{BoxedSkipStorage, SkipList};
//!
//! let mut storage: BoxedSkipStorage<&str> = BoxedSkipStorage::with_capacity(16);
//! let mut queue: SkipList<&str, _> = SkipList::new();
//!
//! // Entropy picks the node's level; any cheap varying word will do.
//! queue.try_insert(&mut storage, 30, "c", 0x9e37_79b9).unwrap();
//! let b = queue.try_insert(&mut storage, 20, "b", 0x7f4a_7c15).unwrap();
//! queue.try_insert(&mut storage, 10, "a", 0x85eb_ca6b).unwrap();
//!
//! assert_eq!(queue.first(&storage), Some((10, &"a")));
//!
//! // Cancel by handle, no search
//! assert_eq!(queue.remove(&mut storage, b), Ok("b"));
//!
//! assert_eq!(queue.pop_first(&mut storage), Some((10, "a")));
//! assert_eq!(queue.pop_first(&mut storage), Some((30, "c")));
//! assert!(queue.is_empty());
//! ```

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU64, Ordering};

use rand_core::RngCore;
use tracing::{debug, trace};

use crate::error::Error;
use crate::index::Index;
use crate::level::{MAX_NUMBER_OF_LEVELS, random_level};
use crate::node::{Link, SkipNode};
use crate::storage::{BoundedStorage, BoxedStorage, Full, Storage, UnboundedStorage};

/// Fixed-capacity storage for skip list nodes.
pub type BoxedSkipStorage<V, Idx = u32> = BoxedStorage<SkipNode<V, Idx>, Idx>;

/// Growable `slab::Slab` storage for skip list nodes.
#[cfg(feature = "slab")]
pub type SlabSkipStorage<V> = slab::Slab<SkipNode<V, usize>>;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Handle
// ============================================================================

/// Caller-held reference to one entry of a [`SkipList`].
///
/// Returned by insertion, consumed by [`SkipList::remove`]. A handle stays
/// valid until its entry is removed; after that the list rejects it with
/// [`Error::InvalidHandle`] even if the storage slot has been reused. Each
/// insertion takes a fresh 64-bit stamp, so a later entry in the same slot
/// never carries a matching one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<Idx: Index = u32> {
    index: Idx,
    stamp: u64,
}

impl<Idx: Index> Handle<Idx> {
    /// Storage index of the entry.
    #[inline]
    pub fn index(&self) -> Idx {
        self.index
    }
}

// ============================================================================
// SkipList
// ============================================================================

/// Ordered multi-set of `u64` keys with handle-based removal.
///
/// # Type Parameters
///
/// - `V`: Value type, opaque to the list
/// - `S`: Storage type implementing [`Storage`] for [`SkipNode<V, Idx>`]
/// - `Idx`: Storage index type, defaults to `u32`
///
/// # Invariants
///
/// Between operations, for every level `i`:
/// - the chain from the header through `next` is sorted by key, equal keys in
///   insertion order
/// - `a.next == b` exactly when `b.prev == a`
/// - a node appears only at levels `0..=node.level()`
///
/// and [`level`](Self::level) is the highest level any node occupies (0 when
/// empty).
///
/// # Concurrency
///
/// Operations take `&mut self` and `&mut S`; sharing across threads needs an
/// outer lock around both.
#[derive(Debug)]
pub struct SkipList<V, S, Idx: Index = u32> {
    /// Header forward links: `head[i]` is the first node at level `i`.
    head: [Idx; MAX_NUMBER_OF_LEVELS],
    /// Header backward links: `tail[i]` is the last node at level `i`.
    tail: [Idx; MAX_NUMBER_OF_LEVELS],
    /// Highest level in use (0-indexed).
    level: usize,
    len: usize,
    /// Stamped into nodes so foreign handles are rejected.
    id: u64,
    /// Never reused: 2^64 insertions outlast any process.
    next_stamp: u64,
    _marker: PhantomData<(V, S)>,
}

impl<V, S, Idx: Index> SkipList<V, S, Idx> {
    /// Creates an empty list. Does not allocate.
    pub fn new() -> Self {
        Self {
            head: [Idx::HEADER; MAX_NUMBER_OF_LEVELS],
            tail: [Idx::HEADER; MAX_NUMBER_OF_LEVELS],
            level: 0,
            len: 0,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            next_stamp: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the highest level index currently in use, `0..=MAX_LEVEL`.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }
}

impl<V, S, Idx: Index> Default for SkipList<V, S, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S, Idx> SkipList<V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the smallest entry, or `None` if empty.
    ///
    /// This is the header's level-0 successor, so O(1). Among equal keys it
    /// is the earliest inserted.
    #[inline]
    pub fn first<'a>(&self, storage: &'a S) -> Option<(u64, &'a V)> {
        self.entry_at(storage, self.head[0])
    }

    /// Returns a handle to the smallest entry, or `None` if empty.
    #[inline]
    pub fn first_handle(&self, storage: &S) -> Option<Handle<Idx>> {
        self.handle_at(storage, self.head[0])
    }

    /// Returns the largest entry, or `None` if empty.
    ///
    /// O(1) through the header's level-0 predecessor.
    #[inline]
    pub fn last<'a>(&self, storage: &'a S) -> Option<(u64, &'a V)> {
        self.entry_at(storage, self.tail[0])
    }

    /// Returns a handle to the largest entry, or `None` if empty.
    #[inline]
    pub fn last_handle(&self, storage: &S) -> Option<Handle<Idx>> {
        self.handle_at(storage, self.tail[0])
    }

    /// Returns the key and value behind `handle`, or `None` if the handle is
    /// not live in this list.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, handle: Handle<Idx>) -> Option<(u64, &'a V)> {
        storage
            .get(handle.index)
            .filter(|node| self.owns(node, handle))
            .map(|node| (node.key, &node.value))
    }

    /// Returns a mutable reference to the value behind `handle`.
    ///
    /// The key is fixed once inserted; re-key by removing and inserting.
    #[inline]
    pub fn get_mut<'a>(&self, storage: &'a mut S, handle: Handle<Idx>) -> Option<&'a mut V> {
        storage
            .get_mut(handle.index)
            .filter(|node| self.owns(node, handle))
            .map(|node| &mut node.value)
    }

    /// Returns `true` if `handle` refers to a live entry of this list.
    #[inline]
    pub fn contains(&self, storage: &S, handle: Handle<Idx>) -> bool {
        self.get(storage, handle).is_some()
    }

    /// Returns the level the entry behind `handle` occupies.
    #[inline]
    pub fn node_level(&self, storage: &S, handle: Handle<Idx>) -> Option<usize> {
        storage
            .get(handle.index)
            .filter(|node| self.owns(node, handle))
            .map(SkipNode::level)
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Removes the entry behind `handle` and returns its value.
    ///
    /// Unlinks the node from each of its `level + 1` chains using only its own
    /// links; no search, no key comparison. If the node was the last occupant
    /// of the top level(s), [`level`](Self::level) drops accordingly.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if the handle was already removed, was issued
    /// by another list, or its slot has since been reused. The list is left
    /// untouched.
    pub fn remove(&mut self, storage: &mut S, handle: Handle<Idx>) -> Result<V, Error> {
        let valid = storage
            .get(handle.index)
            .is_some_and(|node| self.owns(node, handle));
        if !valid {
            trace!(list = self.id, stamp = handle.stamp, "rejected skiplist handle");
            return Err(Error::InvalidHandle);
        }

        Ok(self.unlink(storage, handle.index).value)
    }

    /// Removes the smallest entry and returns it.
    pub fn pop_first(&mut self, storage: &mut S) -> Option<(u64, V)> {
        let first = self.head[0];
        if first.is_header() {
            return None;
        }
        let node = self.unlink(storage, first);
        Some((node.key, node.value))
    }

    /// Removes every entry from the list and its storage.
    pub fn clear(&mut self, storage: &mut S) {
        let mut current = self.head[0];
        while !current.is_header() {
            // Safety: current is linked at level 0
            let node = unsafe { storage.remove_unchecked(current) };
            current = node.links[0].next;
        }

        self.head = [Idx::HEADER; MAX_NUMBER_OF_LEVELS];
        self.tail = [Idx::HEADER; MAX_NUMBER_OF_LEVELS];
        self.level = 0;
        self.len = 0;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over `(handle, key, value)` in ascending key order.
    ///
    /// Double-ended: `.rev()` walks the backward links.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, V, S, Idx> {
        Iter {
            storage,
            front: self.head[0],
            back: self.tail[0],
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the chain at `level`, yielding
    /// `(handle, key)`.
    ///
    /// Levels above [`level`](Self::level) are empty. Double-ended: the
    /// backward walk follows `prev` links, so comparing both directions checks
    /// link symmetry.
    #[inline]
    pub fn level_iter<'a>(&self, storage: &'a S, level: usize) -> LevelIter<'a, V, S, Idx> {
        let (front, back) = match (self.head.get(level), self.tail.get(level)) {
            (Some(&front), Some(&back)) => (front, back),
            _ => (Idx::HEADER, Idx::HEADER),
        };
        LevelIter {
            storage,
            level,
            front,
            back,
            done: front.is_header(),
            _marker: PhantomData,
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn owns(&self, node: &SkipNode<V, Idx>, handle: Handle<Idx>) -> bool {
        node.owner == self.id && node.stamp == handle.stamp
    }

    #[inline]
    fn entry_at<'a>(&self, storage: &'a S, idx: Idx) -> Option<(u64, &'a V)> {
        if idx.is_header() {
            return None;
        }
        // Safety: header links only name linked nodes
        let node = unsafe { storage.get_unchecked(idx) };
        Some((node.key, &node.value))
    }

    #[inline]
    fn handle_at(&self, storage: &S, idx: Idx) -> Option<Handle<Idx>> {
        if idx.is_header() {
            return None;
        }
        // Safety: header links only name linked nodes
        let stamp = unsafe { storage.get_unchecked(idx) }.stamp;
        Some(Handle { index: idx, stamp })
    }

    /// Successor of `at` on `level`.
    #[inline]
    fn next_of(&self, storage: &S, at: Idx, level: usize) -> Idx {
        if at.is_header() {
            self.head[level]
        } else {
            // Safety: at is linked on level
            unsafe { storage.get_unchecked(at) }.links[level].next
        }
    }

    #[inline]
    fn set_next(&mut self, storage: &mut S, at: Idx, level: usize, to: Idx) {
        if at.is_header() {
            self.head[level] = to;
        } else {
            // Safety: at is linked on level
            unsafe { storage.get_unchecked_mut(at) }.links[level].next = to;
        }
    }

    #[inline]
    fn set_prev(&mut self, storage: &mut S, at: Idx, level: usize, to: Idx) {
        if at.is_header() {
            self.tail[level] = to;
        } else {
            // Safety: at is linked on level
            unsafe { storage.get_unchecked_mut(at) }.links[level].prev = to;
        }
    }

    /// Walks down from the top level collecting, per level, the last node
    /// whose key is `<= key`. Levels above `self.level` keep the header.
    ///
    /// Using `<=` rather than `<` is what puts a new node after every
    /// existing node with the same key.
    #[inline]
    fn predecessors(&self, storage: &S, key: u64) -> [Idx; MAX_NUMBER_OF_LEVELS] {
        let mut update = [Idx::HEADER; MAX_NUMBER_OF_LEVELS];
        let mut current = Idx::HEADER;

        for i in (0..=self.level).rev() {
            loop {
                let next = self.next_of(storage, current, i);
                // The header ends the walk by identity, so u64::MAX keys are fine
                if next.is_header() {
                    break;
                }
                // Safety: next is linked on level i
                if unsafe { storage.get_unchecked(next) }.key > key {
                    break;
                }
                current = next;
            }
            update[i] = current;
        }

        update
    }

    /// Level for a new node: the drawn level, but never more than one above
    /// the current top.
    #[inline]
    fn node_level_for(&self, entropy: u64) -> usize {
        let drawn = random_level(entropy);
        if drawn > self.level {
            self.level + 1
        } else {
            drawn
        }
    }

    #[inline]
    fn take_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    /// Splices the freshly stored node at `idx` after `update[i]` on every
    /// level `0..=level`, growing the list's top level if needed.
    #[inline]
    fn link_node(
        &mut self,
        storage: &mut S,
        idx: Idx,
        level: usize,
        update: &[Idx; MAX_NUMBER_OF_LEVELS],
    ) {
        if level > self.level {
            trace!(list = self.id, from = self.level, to = level, "skiplist level grew");
            self.level = level;
        }

        for i in (0..=level).rev() {
            let prev = update[i];
            let next = self.next_of(storage, prev, i);
            {
                // Safety: idx was just inserted
                let node = unsafe { storage.get_unchecked_mut(idx) };
                node.links[i] = Link { prev, next };
            }
            self.set_next(storage, prev, i, idx);
            self.set_prev(storage, next, i, idx);
        }

        self.len += 1;
    }

    /// Unlinks the node at `idx` from every level it occupies, frees its
    /// slot, and shrinks the top level if it was the last occupant.
    ///
    /// Rewrites exactly `level + 1` link pairs.
    fn unlink(&mut self, storage: &mut S, idx: Idx) -> SkipNode<V, Idx> {
        // Safety: caller checked idx is a live node of this list
        let node = unsafe { storage.remove_unchecked(idx) };

        for (i, link) in node.links.iter().enumerate() {
            self.set_next(storage, link.prev, i, link.next);
            self.set_prev(storage, link.next, i, link.prev);
        }
        self.len -= 1;

        let level = node.level();
        if level == self.level {
            self.shrink_from(level);
        }

        node
    }

    #[inline]
    fn shrink_from(&mut self, mut level: usize) {
        while level > 0 && self.head[level].is_header() && self.tail[level].is_header() {
            level -= 1;
        }
        if level != self.level {
            trace!(list = self.id, from = self.level, to = level, "skiplist level shrank");
        }
        self.level = level;
    }
}

// ============================================================================
// Bounded storage impl
// ============================================================================

impl<V, S, Idx> SkipList<V, S, Idx>
where
    Idx: Index,
    S: BoundedStorage<SkipNode<V, Idx>, Index = Idx>,
{
    /// Inserts `value` under `key` and returns a handle to the new entry.
    ///
    /// The entry goes after every existing entry with the same key. Its level
    /// comes from `entropy` (see [`random_level`]), capped at one above the
    /// current top level.
    ///
    /// # Errors
    ///
    /// Returns the value in [`Full`] if storage has no free slot. The list is
    /// unchanged in that case.
    pub fn try_insert(
        &mut self,
        storage: &mut S,
        key: u64,
        value: V,
        entropy: u64,
    ) -> Result<Handle<Idx>, Full<V>> {
        let update = self.predecessors(storage, key);
        let level = self.node_level_for(entropy);
        let stamp = self.next_stamp;

        let node = SkipNode::new(key, value, level, self.id, stamp);
        let idx = match storage.try_insert(node) {
            Ok(idx) => idx,
            Err(Full(node)) => {
                debug!(list = self.id, key, len = self.len, "skiplist storage full");
                return Err(Full(node.value));
            }
        };

        self.link_node(storage, idx, level, &update);
        let stamp = self.take_stamp();
        Ok(Handle { index: idx, stamp })
    }

    /// Like [`try_insert`](Self::try_insert), drawing entropy from `rng`.
    #[inline]
    pub fn try_insert_with_rng<R: RngCore + ?Sized>(
        &mut self,
        storage: &mut S,
        key: u64,
        value: V,
        rng: &mut R,
    ) -> Result<Handle<Idx>, Full<V>> {
        self.try_insert(storage, key, value, rng.next_u64())
    }
}

// ============================================================================
// Unbounded storage impl
// ============================================================================

impl<V, S, Idx> SkipList<V, S, Idx>
where
    Idx: Index,
    S: UnboundedStorage<SkipNode<V, Idx>, Index = Idx>,
{
    /// Inserts `value` under `key` and returns a handle to the new entry.
    ///
    /// Same placement and level rules as [`try_insert`](Self::try_insert).
    ///
    /// Growable storage aborts if the allocator fails. Where running out of
    /// memory must come back as an error, build the list on
    /// [`BoxedStorage`] and use [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, storage: &mut S, key: u64, value: V, entropy: u64) -> Handle<Idx> {
        let update = self.predecessors(storage, key);
        let level = self.node_level_for(entropy);
        let stamp = self.take_stamp();

        let idx = storage.insert(SkipNode::new(key, value, level, self.id, stamp));
        self.link_node(storage, idx, level, &update);

        Handle { index: idx, stamp }
    }

    /// Like [`insert`](Self::insert), drawing entropy from `rng`.
    #[inline]
    pub fn insert_with_rng<R: RngCore + ?Sized>(
        &mut self,
        storage: &mut S,
        key: u64,
        value: V,
        rng: &mut R,
    ) -> Handle<Idx> {
        self.insert(storage, key, value, rng.next_u64())
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Iterator over `(handle, key, value)` in ascending key order.
pub struct Iter<'a, V, S, Idx: Index> {
    storage: &'a S,
    front: Idx,
    back: Idx,
    remaining: usize,
    _marker: PhantomData<&'a V>,
}

impl<'a, V: 'a, S, Idx> Iterator for Iter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
    type Item = (Handle<Idx>, u64, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        // Safety: remaining > 0 so front is a linked node
        let node = unsafe { self.storage.get_unchecked(idx) };
        self.front = node.links[0].next;
        self.remaining -= 1;
        Some((
            Handle {
                index: idx,
                stamp: node.stamp,
            },
            node.key,
            &node.value,
        ))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V: 'a, S, Idx> DoubleEndedIterator for Iter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        // Safety: remaining > 0 so back is a linked node
        let node = unsafe { self.storage.get_unchecked(idx) };
        self.back = node.links[0].prev;
        self.remaining -= 1;
        Some((
            Handle {
                index: idx,
                stamp: node.stamp,
            },
            node.key,
            &node.value,
        ))
    }
}

impl<'a, V: 'a, S, Idx> ExactSizeIterator for Iter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
}

impl<'a, V: 'a, S, Idx> FusedIterator for Iter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
}

/// Iterator over one level's chain, yielding `(handle, key)`.
pub struct LevelIter<'a, V, S, Idx: Index> {
    storage: &'a S,
    level: usize,
    front: Idx,
    back: Idx,
    done: bool,
    _marker: PhantomData<&'a V>,
}

impl<'a, V: 'a, S, Idx> Iterator for LevelIter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
    type Item = (Handle<Idx>, u64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.front;
        // Safety: not done, so front is linked on this level
        let node = unsafe { self.storage.get_unchecked(idx) };
        if idx == self.back {
            self.done = true;
        } else {
            self.front = node.links[self.level].next;
        }
        Some((
            Handle {
                index: idx,
                stamp: node.stamp,
            },
            node.key,
        ))
    }
}

impl<'a, V: 'a, S, Idx> DoubleEndedIterator for LevelIter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.back;
        // Safety: not done, so back is linked on this level
        let node = unsafe { self.storage.get_unchecked(idx) };
        if idx == self.front {
            self.done = true;
        } else {
            self.back = node.links[self.level].prev;
        }
        Some((
            Handle {
                index: idx,
                stamp: node.stamp,
            },
            node.key,
        ))
    }
}

impl<'a, V: 'a, S, Idx> FusedIterator for LevelIter<'a, V, S, Idx>
where
    Idx: Index,
    S: Storage<SkipNode<V, Idx>, Index = Idx>,
{
}


#[cfg(test)]
mod bench_skiplist {
    use super::*;
    use hdrhistogram::Histogram;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    type BenchList = SkipList<u64, BoxedSkipStorage<u64>>;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    fn filled(n: usize, rng: &mut SmallRng) -> (BoxedSkipStorage<u64>, BenchList, Vec<Handle>) {
        let mut storage = BoxedSkipStorage::with_capacity(n + 1);
        let mut list = BenchList::new();
        let handles = (0..n)
            .map(|_| {
                let key = rng.next_u64() % 1_000_000;
                list.try_insert_with_rng(&mut storage, key, key, rng).unwrap()
            })
            .collect();
        (storage, list, handles)
    }

    #[test]
    #[ignore]
    fn bench_run_queue_cycles() {
        const N: usize = 10_000;
        const OPS: usize = 100_000;

        let mut rng = SmallRng::seed_from_u64(42);
        let (mut storage, mut list, _) = filled(N, &mut rng);

        let mut insert = Histogram::<u64>::new(3).unwrap();
        let mut remove = Histogram::<u64>::new(3).unwrap();
        let mut pop = Histogram::<u64>::new(3).unwrap();
        let mut first = Histogram::<u64>::new(3).unwrap();

        for _ in 0..OPS {
            let key = rng.next_u64() % 1_000_000;
            let entropy = rng.next_u64();

            let start = rdtscp();
            let h = list.try_insert(&mut storage, key, key, entropy).unwrap();
            insert.record(rdtscp().saturating_sub(start)).unwrap();

            let start = rdtscp();
            let _ = std::hint::black_box(list.remove(&mut storage, h));
            remove.record(rdtscp().saturating_sub(start)).unwrap();

            let start = rdtscp();
            let _ = std::hint::black_box(list.first(&storage));
            first.record(rdtscp().saturating_sub(start)).unwrap();

            let start = rdtscp();
            let popped = list.pop_first(&mut storage);
            pop.record(rdtscp().saturating_sub(start)).unwrap();
            if let Some((k, v)) = popped {
                list.try_insert(&mut storage, k, v, rng.next_u64()).unwrap();
            }
        }

        println!("\nSkipList<u64> run queue ({N} entries, {OPS} ops)");
        print_histogram("try_insert", &insert);
        print_histogram("remove (handle)", &remove);
        print_histogram("first", &first);
        print_histogram("pop_first", &pop);
    }

    #[test]
    #[ignore]
    fn bench_remove_scaling() {
        println!("\nremove by handle vs list size");
        for n in [100, 1_000, 10_000, 50_000] {
            let mut rng = SmallRng::seed_from_u64(n as u64);
            let (mut storage, mut list, handles) = filled(n, &mut rng);
            let mut hist = Histogram::<u64>::new(3).unwrap();

            for h in handles {
                let start = rdtscp();
                let _ = std::hint::black_box(list.remove(&mut storage, h));
                hist.record(rdtscp().saturating_sub(start)).unwrap();
            }
            print_histogram(&format!("n = {n}"), &hist);
        }
    }
}
