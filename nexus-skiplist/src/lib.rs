//! Skip list run queue over external storage.
//!
//! An ordered multi-set of `u64` keys built for dispatchers: the smallest
//! entry is always one hop from the header, and an entry located once at
//! insertion can be cancelled later through its handle without searching.
//!
//! # Design Philosophy
//!
//! ```text
//! Storage (BoxedStorage / Slab) - owns nodes, provides stable indices
//! SkipList                      - links indices into ordered levels
//! Handle                        - caller's key back to one node
//! ```
//!
//! - **Stable handles**: other entries coming and going never move a node
//! - **Zero allocation on hot path**: [`BoxedStorage`] reserves every slot up front
//! - **Fallible construction**: allocation failure is an [`Error`], not an abort
//! - **Deterministic levels**: node levels are a pure function of caller entropy
//!
//! # Quick Start
//!
//! ```
//! use nexus_skiplist::{BoxedSkipStorage, SkipList};
//!
//! let mut storage: BoxedSkipStorage<&str> = BoxedSkipStorage::try_with_capacity(1024)?;
//! let mut queue: SkipList<&str, _> = SkipList::new();
//!
//! // Key orders the queue, entropy only picks the node's level
//! let idle = queue.try_insert(&mut storage, 500, "idle", 0x2545_f491).unwrap();
//! queue.try_insert(&mut storage, 100, "urgent", 0x9e37_79b9).unwrap();
//!
//! // O(1) minimum
//! assert_eq!(queue.first(&storage), Some((100, &"urgent")));
//!
//! // O(level) removal from anywhere
//! assert_eq!(queue.remove(&mut storage, idle)?, "idle");
//! # Ok::<(), nexus_skiplist::Error>(())
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a list must use the same storage instance. A handle
//! from another list, or one whose entry was already removed, is rejected
//! with [`Error::InvalidHandle`]; a different storage instance altogether is
//! the caller's responsibility (same discipline as the `slab` crate).
//!
//! # Levels
//!
//! Each pair of low-order zero bits in the entropy word promotes a node one
//! level (p = 0.25), up to [`MAX_LEVEL`]. A new node is never placed more
//! than one level above the current top, and removing the last node of the
//! top level(s) lowers the top again.
//!
//! | Entropy (low bits) | Level |
//! |--------------------|-------|
//! | `..01`, `..10`, `..11` | 0 |
//! | `..0100` | 1 |
//! | `..01_0000` | 2 |
//! | `0` | 0 |
//!
//! # Storage Options
//!
//! | Storage | Capacity | Insert | Use Case |
//! |---------|----------|--------|----------|
//! | [`BoxedStorage`] | Fixed (runtime) | `try_insert`, returns [`Full`] | Default choice |
//! | `slab::Slab` | Growable | `insert`, infallible | When size unknown |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`
//!
//! # Logging
//!
//! Level growth and shrink, rejected handles, and storage exhaustion are
//! reported through [`tracing`] at `trace`/`debug`. Install a subscriber to
//! see them.

#![warn(missing_docs)]

pub mod error;
pub mod index;
pub mod level;
pub mod node;
pub mod owned;
pub mod skiplist;
pub mod storage;

pub use error::Error;
pub use index::Index;
pub use level::{MAX_LEVEL, MAX_NUMBER_OF_LEVELS, level_from_rng, random_level};
pub use node::SkipNode;
pub use owned::OwnedSkipList;
pub use skiplist::{BoxedSkipStorage, Handle, Iter, LevelIter, SkipList};
pub use storage::{BoundedStorage, BoxedStorage, Full, Storage, UnboundedStorage};

#[cfg(feature = "slab")]
pub use skiplist::SlabSkipStorage;
