//! Level assignment from caller-supplied entropy.
//!
//! A node's level is a pure function of one `u64` entropy word: every pair of
//! low-order zero bits promotes the node one level. Each pair is zero with
//! probability 1/4, so `P(level >= k) = (1/4)^k` (the classic p = 0.25 skip
//! list), with the tail folded into [`MAX_LEVEL`].
//!
//! Only the low bits matter, so a nanosecond timestamp or a counter mixed
//! through a hash is good enough. No generator state is kept here.

use rand_core::RngCore;

/// Highest level index a node can occupy.
pub const MAX_LEVEL: usize = 15;

/// Number of levels, `0..=MAX_LEVEL`. Sized for roughly 64k live entries.
pub const MAX_NUMBER_OF_LEVELS: usize = MAX_LEVEL + 1;

/// Returns the level drawn by `entropy`, in `0..=MAX_LEVEL`.
///
/// Zero entropy carries no set bit to stop on and yields level 0.
///
/// ```
/// use nexus_skiplist::{random_level, MAX_LEVEL};
///
/// assert_eq!(random_level(0b01), 0);
/// assert_eq!(random_level(0b0100), 1);
/// assert_eq!(random_level(0b1_0000_0000), 4);
/// assert_eq!(random_level(1 << 62), MAX_LEVEL);
/// assert_eq!(random_level(0), 0);
/// ```
#[inline]
pub const fn random_level(entropy: u64) -> usize {
    if entropy == 0 {
        return 0;
    }
    let level = (entropy.trailing_zeros() / 2) as usize;
    if level > MAX_LEVEL { MAX_LEVEL } else { level }
}

/// Draws a level from one `u64` of `rng`.
#[inline]
pub fn level_from_rng<R: RngCore + ?Sized>(rng: &mut R) -> usize {
    random_level(rng.next_u64())
}
