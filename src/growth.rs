//! Amortized-doubling growth with an explicit capacity.
//!
//! Capacities run 0, 1, 3, 7, 15, ...: when an append finds `len == capacity`
//! the buffer is regrown to `2 * len + 1` slots, so appends cost amortized O(1)
//! and each append reallocates at most once.

use tracing::{debug, trace};

use crate::error::{OrderedArrayError, Result};
use crate::OrderedArray;

/// Largest element count whose byte size still fits an allocation.
#[inline]
pub(crate) fn max_len_for(elem_size: usize) -> usize {
    isize::MAX as usize / elem_size.max(1)
}

/// Rounds a capacity hint up to the next `2^k - 1`.
#[inline]
pub(crate) fn round_capacity(hint: usize) -> usize {
    if hint == 0 {
        return 0;
    }
    hint.checked_add(1)
        .and_then(usize::checked_next_power_of_two)
        .map_or(usize::MAX, |p| p - 1)
}

/// Capacity bookkeeping shared by the byte-blob and typed containers.
#[derive(Clone, Debug)]
pub(crate) struct Growth {
    capacity: usize,
    max_len: usize,
    reallocations: usize,
}

impl Growth {
    pub(crate) fn new(max_len: usize) -> Self {
        Self {
            capacity: 0,
            max_len,
            reallocations: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub(crate) fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Initial capacity for a hint, rounded to the growth sequence and capped
    /// by the count limit.
    pub(crate) fn initial_capacity(&self, hint: usize) -> usize {
        round_capacity(hint).min(self.max_len)
    }

    /// Decides whether appending at `len` needs a bigger buffer, returning the
    /// new slot count if so.
    ///
    /// Near the count limit the doubled capacity is clamped to `max_len`.
    pub(crate) fn plan(&self, len: usize) -> Result<Option<usize>> {
        if len >= self.max_len {
            debug!(len, max_len = self.max_len, "element count limit reached");
            return Err(OrderedArrayError::CapacityOverflow {
                max_len: self.max_len,
            });
        }
        if len < self.capacity {
            return Ok(None);
        }
        let slots = len.saturating_mul(2).saturating_add(1).min(self.max_len);
        Ok(Some(slots))
    }

    /// Records that the buffer now holds `slots` slots.
    pub(crate) fn commit(&mut self, slots: usize) {
        trace!(from = self.capacity, to = slots, "grew buffer");
        self.capacity = slots;
        self.reallocations += 1;
    }
}

impl OrderedArray {
    /// Appends a slot at index `len` and returns its index.
    ///
    /// With `Some(value)` the slot receives a copy of `value`; with `None` it is
    /// zero-filled. The caller is responsible for keeping the array sorted;
    /// [`insert_at`](Self::insert_at) and the keyed operations do so.
    ///
    /// On error nothing changes: `len`, capacity and contents are as before.
    pub fn reserve_slot(&mut self, value: Option<&[u8]>) -> Result<usize> {
        if let Some(value) = value {
            self.check_size(value)?;
        }
        if let Some(slots) = self.growth.plan(self.len)? {
            self.grow_to(slots)?;
        }

        let index = self.len;
        self.len += 1;
        let slot = self.slot_mut(index);
        match value {
            Some(value) => slot.copy_from_slice(value),
            None => slot.fill(0),
        }
        Ok(index)
    }

    /// Regrows the byte buffer to hold exactly `slots` slots.
    pub(crate) fn grow_to(&mut self, slots: usize) -> Result<()> {
        let bytes = slots
            .checked_mul(self.elem_size)
            .ok_or(OrderedArrayError::CapacityOverflow {
                max_len: self.growth.max_len(),
            })?;
        debug_assert!(bytes >= self.bytes.len());

        if let Err(source) = self.bytes.try_reserve_exact(bytes - self.bytes.len()) {
            debug!(slots, elem_size = self.elem_size, "allocation failed");
            return Err(OrderedArrayError::AllocationFailure { slots, source });
        }
        self.bytes.resize(bytes, 0);
        self.growth.commit(slots);
        Ok(())
    }
}
