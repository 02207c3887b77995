//! Slab-like node storage with stable indices.
//!
//! The skip list never owns its nodes directly. Nodes live in a [`Storage`]
//! and refer to one another by index, so a node handle stays valid while
//! other entries come and go, and several lists can share one pool.

use core::convert::Infallible;
use core::mem;

use crate::Index;
use crate::error::Error;

/// Node pool a [`SkipList`](crate::SkipList) links through.
///
/// An index handed out by `try_insert` must name the same value until that
/// value is removed, and must never be [`Index::HEADER`]. The `unchecked`
/// methods are what the list uses on links it already knows to be live.
pub trait Storage<T> {
    /// Slot index type.
    type Index: Index;

    /// [`Full<T>`] when bounded, [`Infallible`] when growable.
    type Error;

    /// Stores `value` and returns its slot.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error>;

    /// Takes the value out of `index`, if occupied.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Value at `index`, if occupied.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Mutable value at `index`, if occupied.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// # Safety
    ///
    /// `index` must be occupied.
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T;

    /// # Safety
    ///
    /// `index` must be occupied.
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T;

    /// # Safety
    ///
    /// `index` must be occupied.
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T;
}

/// Storage with a slot count fixed at construction.
pub trait BoundedStorage<T>: Storage<T, Error = Full<T>> {
    /// Total slots, occupied or not.
    fn capacity(&self) -> usize;
}

/// Storage that grows on demand. Running out of memory aborts.
pub trait UnboundedStorage<T>: Storage<T, Error = Infallible> {
    /// Stores `value` and returns its slot.
    fn insert(&mut self, value: T) -> Self::Index;
}

/// Bounded storage had no vacant slot; carries the rejected value back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// The value that was not stored.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("no vacant slot in node storage")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// BoxedStorage - fixed capacity, reserved once, intrusive free list
// =============================================================================

#[derive(Debug)]
enum Slot<T, Idx> {
    Occupied(T),
    Vacant { next_free: Option<Idx> },
}

/// Fixed-capacity storage with runtime-determined size.
///
/// All slots are reserved when the storage is built, so inserting never
/// touches the allocator. Vacant slots form a LIFO free list: the most
/// recently freed slot is reused first.
///
/// # Example
///
/// ```
/// use nexus_skiplist::{BoxedStorage, Storage};
///
/// let mut storage: BoxedStorage<u64> = BoxedStorage::try_with_capacity(1000)?;
/// assert_eq!(storage.capacity(), 1000);
///
/// let idx = storage.try_insert(42).unwrap();
/// assert_eq!(storage.get(idx), Some(&42));
/// # Ok::<(), nexus_skiplist::Error>(())
/// ```
#[derive(Debug)]
pub struct BoxedStorage<T, Idx: Index = u32> {
    slots: Vec<Slot<T, Idx>>,
    /// Most recently vacated slot, `None` when full.
    free_head: Option<Idx>,
    len: usize,
}

impl<T, Idx: Index> BoxedStorage<T, Idx> {
    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// - [`Error::CapacityOverflow`] if `capacity` slots cannot be addressed
    ///   by `Idx` (the header value is never a slot).
    /// - [`Error::Alloc`] if the allocator refuses the reservation.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity > Idx::HEADER.slot() {
            return Err(Error::CapacityOverflow { capacity });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Alloc {
                bytes: capacity.saturating_mul(mem::size_of::<Slot<T, Idx>>()),
            })?;

        slots.extend((0..capacity).map(|i| Slot::Vacant {
            next_free: Self::slot_after(i, capacity),
        }));
        let free_head = (capacity > 0).then(|| Idx::from_slot(0));

        Ok(Self {
            slots,
            free_head,
            len: 0,
        })
    }

    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if [`try_with_capacity`](Self::try_with_capacity) fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(storage) => storage,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }

    #[inline]
    fn slot_after(i: usize, capacity: usize) -> Option<Idx> {
        (i + 1 < capacity).then(|| Idx::from_slot(i + 1))
    }

    /// Drops every stored value and makes all slots available again.
    ///
    /// # Warning
    ///
    /// Lists that still hold indices into this storage are left dangling.
    /// Clear those lists first, or use [`OwnedSkipList`](crate::OwnedSkipList)
    /// which does both.
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = Slot::Vacant {
                next_free: Self::slot_after(i, capacity),
            };
        }
        self.free_head = (capacity > 0).then(|| Idx::from_slot(0));
        self.len = 0;
    }

    #[inline]
    fn vacate(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.slot())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let next_free = self.free_head;
        match mem::replace(slot, Slot::Vacant { next_free }) {
            Slot::Occupied(value) => {
                self.free_head = Some(index);
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => None,
        }
    }
}

impl<T, Idx: Index> Storage<T> for BoxedStorage<T, Idx> {
    type Index = Idx;
    type Error = Full<T>;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error> {
        let Some(idx) = self.free_head else {
            return Err(Full(value));
        };
        let Some(slot) = self.slots.get_mut(idx.slot()) else {
            return Err(Full(value));
        };

        match mem::replace(slot, Slot::Occupied(value)) {
            Slot::Vacant { next_free } => {
                self.free_head = next_free;
                self.len += 1;
                Ok(idx)
            }
            // The free list only threads vacant slots.
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        }
    }

    #[inline]
    fn remove(&mut self, index: Self::Index) -> Option<T> {
        self.vacate(index)
    }

    #[inline]
    fn get(&self, index: Self::Index) -> Option<&T> {
        match self.slots.get(index.slot())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T> {
        match self.slots.get_mut(index.slot())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T {
        // Safety: caller guarantees the slot exists and is occupied
        match unsafe { self.slots.get_unchecked(index.slot()) } {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T {
        // Safety: caller guarantees the slot exists and is occupied
        match unsafe { self.slots.get_unchecked_mut(index.slot()) } {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T {
        debug_assert!(self.get(index).is_some(), "remove_unchecked on vacant slot");
        match self.vacate(index) {
            Some(value) => value,
            // Safety: caller guarantees the slot is occupied
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

impl<T, Idx: Index> BoundedStorage<T> for BoxedStorage<T, Idx> {
    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;
    type Error = Infallible;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Self::Error> {
        Ok(slab::Slab::insert(self, value))
    }

    #[inline]
    fn remove(&mut self, index: Self::Index) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: Self::Index) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    unsafe fn get_unchecked(&self, index: Self::Index) -> &T {
        unsafe { slab::Slab::get_unchecked(self, index) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, index: Self::Index) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, index) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, index: Self::Index) -> T {
        slab::Slab::remove(self, index)
    }
}

#[cfg(feature = "slab")]
impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> Self::Index {
        slab::Slab::insert(self, value)
    }
}
