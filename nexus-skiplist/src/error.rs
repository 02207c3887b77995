//! Error types.

use thiserror::Error;

/// Errors reported by storage construction and handle-based access.
///
/// Storage exhaustion on insert is reported separately as
/// [`Full`](crate::Full), which hands the rejected value back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The allocator could not provide the node storage.
    #[error("failed to allocate {bytes} bytes of node storage")]
    Alloc {
        /// Size of the rejected request.
        bytes: usize,
    },

    /// The requested capacity is not addressable by the index type.
    #[error("capacity {capacity} is not addressable by the index type")]
    CapacityOverflow {
        /// Requested capacity.
        capacity: usize,
    },

    /// The handle is stale, already removed, or belongs to another list.
    #[error("handle does not refer to a live entry of this list")]
    InvalidHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::Alloc { bytes: 64 }.to_string(),
            "failed to allocate 64 bytes of node storage"
        );
        assert_eq!(
            Error::CapacityOverflow { capacity: 70_000 }.to_string(),
            "capacity 70000 is not addressable by the index type"
        );
        assert_eq!(
            Error::InvalidHandle.to_string(),
            "handle does not refer to a live entry of this list"
        );
    }
}
