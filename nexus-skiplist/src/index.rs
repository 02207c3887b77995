//! Storage slot indices as link targets.
//!
//! Nodes link to each other by storage slot, not by pointer. The largest
//! value of each index type is never a slot; in a link it is
//! [`HEADER`](Index::HEADER), the list's own sentinel. A level whose header
//! links are both `HEADER` is empty (the header "points at itself").

use core::fmt::Debug;

/// An unsigned slot index with one value set aside for the list header.
///
/// Implemented for `u16`, `u32` and `usize`. Pick the narrowest type that
/// addresses the storage: links are stored two per level per node.
///
/// ```
/// use nexus_skiplist::Index;
///
/// assert!(u32::HEADER.is_header());
/// assert!(!7u32.is_header());
/// assert_eq!(u16::from_slot(7).slot(), 7);
/// assert_eq!(u16::HEADER.slot(), 65_535);
/// ```
pub trait Index: Copy + Eq + Debug + 'static {
    /// The list header. Never handed out as a storage slot.
    const HEADER: Self;

    /// Slot position in storage.
    fn slot(self) -> usize;

    /// Index for slot position `slot`, which must be below `HEADER.slot()`.
    fn from_slot(slot: usize) -> Self;

    /// Returns `true` if this link target is the list header.
    #[inline]
    fn is_header(self) -> bool {
        self == Self::HEADER
    }
}

macro_rules! header_index {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const HEADER: Self = <$ty>::MAX;

                #[inline]
                fn slot(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_slot(slot: usize) -> Self {
                    debug_assert!(slot < Self::HEADER as usize, "slot {slot} collides with the header");
                    slot as Self
                }
            }
        )*
    };
}

header_index!(u16, u32, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn check<Idx: Index>(top_slot: usize) {
        assert!(Idx::HEADER.is_header());
        assert_eq!(Idx::HEADER.slot(), top_slot + 1);
        assert!(!Idx::from_slot(0).is_header());
        assert!(!Idx::from_slot(top_slot).is_header());
        assert_eq!(Idx::from_slot(top_slot).slot(), top_slot);
    }

    #[test]
    fn header_is_one_past_the_last_slot() {
        check::<u16>(u16::MAX as usize - 1);
        check::<u32>(u32::MAX as usize - 1);
        check::<usize>(usize::MAX - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "collides with the header")]
    fn header_slot_is_rejected() {
        let _ = u16::from_slot(u16::MAX as usize);
    }
}
