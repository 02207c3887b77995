//! OwnedSkipList - a skip list that owns its storage.

use rand_core::RngCore;

use crate::skiplist::{BoxedSkipStorage, Handle, Iter, LevelIter, SkipList};
use crate::{Error, Full, Index};

/// A skip list that owns its storage.
///
/// Convenience wrapper around [`SkipList`] + [`BoxedSkipStorage`] for the
/// common case of one run queue with its own node pool. Use [`SkipList`]
/// directly when several lists share storage.
///
/// # Example
///
/// ```
/// use nexus_skiplist::OwnedSkipList;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(12345);
/// let mut queue: OwnedSkipList<&str> = OwnedSkipList::try_with_capacity(64)?;
///
/// let late = queue.try_insert_with_rng(300, "late", &mut rng).unwrap();
/// queue.try_insert_with_rng(100, "soon", &mut rng).unwrap();
/// queue.try_insert_with_rng(100, "soon, queued second", &mut rng).unwrap();
///
/// queue.remove(late)?;
///
/// assert_eq!(queue.pop_first(), Some((100, "soon")));
/// assert_eq!(queue.pop_first(), Some((100, "soon, queued second")));
/// assert_eq!(queue.pop_first(), None);
/// # Ok::<(), nexus_skiplist::Error>(())
/// ```
#[derive(Debug)]
pub struct OwnedSkipList<V, Idx: Index = u32> {
    storage: BoxedSkipStorage<V, Idx>,
    list: SkipList<V, BoxedSkipStorage<V, Idx>, Idx>,
}

impl<V, Idx: Index> OwnedSkipList<V, Idx> {
    /// Creates an empty list with room for `capacity` entries.
    ///
    /// # Errors
    ///
    /// See [`BoxedStorage::try_with_capacity`](crate::BoxedStorage::try_with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self {
            storage: BoxedSkipStorage::try_with_capacity(capacity)?,
            list: SkipList::new(),
        })
    }

    /// Creates an empty list with room for `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: BoxedSkipStorage::with_capacity(capacity),
            list: SkipList::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the storage capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the highest level index currently in use.
    #[inline]
    pub fn level(&self) -> usize {
        self.list.level()
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the smallest entry, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<(u64, &V)> {
        self.list.first(&self.storage)
    }

    /// Returns a handle to the smallest entry.
    #[inline]
    pub fn first_handle(&self) -> Option<Handle<Idx>> {
        self.list.first_handle(&self.storage)
    }

    /// Returns the largest entry, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<(u64, &V)> {
        self.list.last(&self.storage)
    }

    /// Returns a handle to the largest entry.
    #[inline]
    pub fn last_handle(&self) -> Option<Handle<Idx>> {
        self.list.last_handle(&self.storage)
    }

    /// Returns the key and value behind `handle`.
    #[inline]
    pub fn get(&self, handle: Handle<Idx>) -> Option<(u64, &V)> {
        self.list.get(&self.storage, handle)
    }

    /// Returns a mutable reference to the value behind `handle`.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle<Idx>) -> Option<&mut V> {
        self.list.get_mut(&mut self.storage, handle)
    }

    /// Returns `true` if `handle` refers to a live entry.
    #[inline]
    pub fn contains(&self, handle: Handle<Idx>) -> bool {
        self.list.contains(&self.storage, handle)
    }

    /// Returns the level the entry behind `handle` occupies.
    #[inline]
    pub fn node_level(&self, handle: Handle<Idx>) -> Option<usize> {
        self.list.node_level(&self.storage, handle)
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Inserts `value` under `key`, with the level drawn from `entropy`.
    ///
    /// # Errors
    ///
    /// Returns the value in [`Full`] if the list is at capacity.
    #[inline]
    pub fn try_insert(&mut self, key: u64, value: V, entropy: u64) -> Result<Handle<Idx>, Full<V>> {
        self.list.try_insert(&mut self.storage, key, value, entropy)
    }

    /// Inserts `value` under `key`, drawing entropy from `rng`.
    #[inline]
    pub fn try_insert_with_rng<R: RngCore + ?Sized>(
        &mut self,
        key: u64,
        value: V,
        rng: &mut R,
    ) -> Result<Handle<Idx>, Full<V>> {
        self.list
            .try_insert_with_rng(&mut self.storage, key, value, rng)
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Removes the entry behind `handle` and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHandle`] if the handle is not live in this list.
    #[inline]
    pub fn remove(&mut self, handle: Handle<Idx>) -> Result<V, Error> {
        self.list.remove(&mut self.storage, handle)
    }

    /// Removes the smallest entry and returns it.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(u64, V)> {
        self.list.pop_first(&mut self.storage)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.list.clear(&mut self.storage);
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over `(handle, key, value)` in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V, BoxedSkipStorage<V, Idx>, Idx> {
        self.list.iter(&self.storage)
    }

    /// Returns an iterator over the chain at `level`.
    #[inline]
    pub fn level_iter(&self, level: usize) -> LevelIter<'_, V, BoxedSkipStorage<V, Idx>, Idx> {
        self.list.level_iter(&self.storage, level)
    }
}
