//! Skip list nodes.

use smallvec::{SmallVec, smallvec};

use crate::Index;

/// Backward and forward neighbour of a node at one level.
///
/// [`Index::HEADER`] on either side is the list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link<Idx> {
    pub(crate) prev: Idx,
    pub(crate) next: Idx,
}

impl<Idx: Index> Link<Idx> {
    const DETACHED: Self = Self {
        prev: Idx::HEADER,
        next: Idx::HEADER,
    };
}

/// A node stored in the list's backing storage.
///
/// Holds the ordering key, the caller's value, and one [`Link`] per level the
/// node occupies. Level-0 nodes (three quarters of them) keep their single
/// link inline; taller nodes spill the link array to the heap.
#[derive(Debug)]
pub struct SkipNode<V, Idx: Index = u32> {
    pub(crate) key: u64,
    pub(crate) value: V,
    /// `links[i]` for `i in 0..=level`.
    pub(crate) links: SmallVec<[Link<Idx>; 1]>,
    /// Id of the list that linked this node.
    pub(crate) owner: u64,
    /// Insertion stamp, echoed by the node's handle.
    pub(crate) stamp: u64,
}

impl<V, Idx: Index> SkipNode<V, Idx> {
    #[inline]
    pub(crate) fn new(key: u64, value: V, level: usize, owner: u64, stamp: u64) -> Self {
        Self {
            key,
            value,
            links: smallvec![Link::DETACHED; level + 1],
            owner,
            stamp,
        }
    }

    /// The ordering key.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// The stored value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Highest level index this node occupies.
    #[inline]
    pub fn level(&self) -> usize {
        self.links.len() - 1
    }
}
