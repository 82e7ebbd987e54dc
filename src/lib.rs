//! # ordered-array
//!
//! A contiguous array of fixed-size elements kept sorted by a comparator the
//! caller supplies on every call.
//!
//! Lookups are a binary search; inserts append a slot (growing the buffer
//! through the capacities 1, 3, 7, 15, ...) and rotate it into place; deletes
//! shift the tail down. Positions are plain indices, valid until the next
//! mutating call.
//!
//! Two containers share that machinery:
//! - [`OrderedArray`] stores opaque byte blobs of a size fixed at construction,
//! - [`SortedVec`] stores typed values.
//!
//! ## Example
//!
//! ```rust
//! use ordered_array::{CaseInsensitive, OrderedArray, OrderedArrayError};
//!
//! fn word(s: &str) -> [u8; 8] {
//!     let mut out = [0u8; 8];
//!     out[..s.len()].copy_from_slice(s.as_bytes());
//!     out
//! }
//!
//! let mut words = OrderedArray::new(8);
//! words.insert(&word("world"), &CaseInsensitive).unwrap();
//! words.insert(&word("hello"), &CaseInsensitive).unwrap();
//!
//! assert_eq!(words.find(&word("HELLO"), &CaseInsensitive), Ok(0));
//! assert_eq!(
//!     words.insert(&word("World"), &CaseInsensitive),
//!     Err(OrderedArrayError::AlreadyExists)
//! );
//! ```

#![forbid(unsafe_code)]

mod array;
mod compare;
mod error;
mod growth;
mod search;
pub mod shift;
mod sorted_vec;

pub use array::{Iter, OrderedArray};
pub use compare::{Bytewise, CaseInsensitive, Comparator};
pub use error::{OrderedArrayError, Result};
pub use search::{find_nearest_by, Nearest};
pub use sorted_vec::SortedVec;

/// Container configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Slots to allocate up front, rounded up to the next `2^k - 1`. Zero
    /// defers allocation to the first insert.
    pub initial_capacity: usize,
    /// Maximum element count. `None` allows as many elements as fit in an
    /// allocation; larger values are capped to that.
    pub max_len: Option<usize>,
}

/// Where a find-or-insert style operation left the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// An equal element was already stored at this index.
    Found(usize),
    /// The value was inserted at this index.
    Inserted(usize),
}

impl Slot {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::Found(i) | Slot::Inserted(i) => i,
        }
    }

    #[inline]
    pub fn is_inserted(self) -> bool {
        matches!(self, Slot::Inserted(_))
    }
}

/// Buffer statistics for a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of stored elements.
    pub len: usize,
    /// Slots available without reallocating.
    pub capacity: usize,
    /// Bytes per element.
    pub elem_size: usize,
    /// Buffer (re)allocations so far.
    pub reallocations: usize,
    /// Bytes held by the backing allocation.
    pub buffer_bytes: usize,
}

#[cfg(test)]
mod proptests;
