use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by [`OrderedArray`](crate::OrderedArray) and
/// [`SortedVec`](crate::SortedVec) operations.
///
/// Every failure leaves the container exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderedArrayError {
    /// No stored element compares equal to the key.
    #[error("no element compares equal to the key")]
    NotFound,

    /// A strict insert found an element comparing equal to the value.
    #[error("an element comparing equal to the value is already present")]
    AlreadyExists,

    /// The element count would exceed the configured maximum.
    #[error("element count would exceed the maximum of {max_len}")]
    CapacityOverflow {
        /// The maximum element count in effect.
        max_len: usize,
    },

    /// The allocator refused to grow the buffer.
    #[error("failed to grow buffer to {slots} slots")]
    AllocationFailure {
        /// Number of slots requested.
        slots: usize,
        #[source]
        source: TryReserveError,
    },

    /// A key or value slice did not match the container's element size.
    #[error("element is {actual} bytes, expected {expected}")]
    ElementSize { expected: usize, actual: usize },

    /// An index did not name an occupied slot.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
}

impl OrderedArrayError {
    /// Whether this error means the buffer could not grow, either because the
    /// count limit was reached or because the allocator failed.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::CapacityOverflow { .. } | Self::AllocationFailure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, OrderedArrayError>;
