use std::fmt;
use std::iter::FusedIterator;

use crate::compare::Comparator;
use crate::error::{OrderedArrayError, Result};
use crate::growth::{max_len_for, Growth};
use crate::search::{find_nearest_by, Nearest};
use crate::shift::{rotate_left_carry, rotate_right_carry, swap_regions, Blobs};
use crate::{Config, Slot, Stats};

/// A sorted, contiguous array of fixed-size byte elements.
///
/// The array carries no comparator: every keyed operation takes one, and the
/// caller must use the same ordering for the array's whole life. Indices
/// returned by one call are only meaningful until the next mutating call.
///
/// Layout:
/// - `bytes` holds `capacity * elem_size` bytes,
/// - slots `[0, len)` are occupied and strictly ascending,
/// - slots `[len, capacity)` are spare and may hold stale bytes.
#[derive(Clone)]
pub struct OrderedArray {
    pub(crate) bytes: Vec<u8>,
    pub(crate) elem_size: usize,
    pub(crate) len: usize,
    pub(crate) growth: Growth,
}

impl OrderedArray {
    /// Creates an empty array of `elem_size`-byte elements. Nothing is
    /// allocated until the first insert.
    pub fn new(elem_size: usize) -> Self {
        Self {
            bytes: Vec::new(),
            elem_size,
            len: 0,
            growth: Growth::new(max_len_for(elem_size)),
        }
    }

    /// Creates an empty array with the given configuration, allocating the
    /// initial capacity up front.
    pub fn with_config(elem_size: usize, config: Config) -> Result<Self> {
        let limit = max_len_for(elem_size);
        let max_len = config.max_len.map_or(limit, |n| n.min(limit));
        let mut array = Self {
            bytes: Vec::new(),
            elem_size,
            len: 0,
            growth: Growth::new(max_len),
        };
        let capacity = array.growth.initial_capacity(config.initial_capacity);
        if capacity > 0 {
            array.grow_to(capacity)?;
        }
        Ok(array)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the buffer holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.growth.capacity()
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Number of times the buffer has been (re)allocated.
    #[inline]
    pub fn reallocations(&self) -> usize {
        self.growth.reallocations()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            len: self.len,
            capacity: self.capacity(),
            elem_size: self.elem_size,
            reallocations: self.reallocations(),
            buffer_bytes: self.bytes.capacity(),
        }
    }

    /// Element at `index`, if occupied.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        (index < self.len).then(|| self.slot(index))
    }

    /// The occupied slots as one byte slice, in order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len * self.elem_size]
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            array: self,
            front: 0,
            back: self.len,
        }
    }

    /// Drops every element. The buffer is kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Binary search for `key`, reporting the exact match or where `key`
    /// would be inserted.
    pub fn find_nearest<C>(&self, key: &[u8], cmp: &C) -> Result<Nearest>
    where
        C: Comparator + ?Sized,
    {
        self.check_size(key)?;
        Ok(find_nearest_by(self.len, |i| cmp.compare(key, self.slot(i))))
    }

    /// Index of the element comparing equal to `key`.
    pub fn find<C>(&self, key: &[u8], cmp: &C) -> Result<usize>
    where
        C: Comparator + ?Sized,
    {
        self.find_nearest(key, cmp)?
            .exact()
            .ok_or(OrderedArrayError::NotFound)
    }

    pub fn contains<C>(&self, key: &[u8], cmp: &C) -> Result<bool>
    where
        C: Comparator + ?Sized,
    {
        Ok(self.find_nearest(key, cmp)?.exact().is_some())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Inserts `value` unless an equal element is present.
    pub fn insert<C>(&mut self, value: &[u8], cmp: &C) -> Result<usize>
    where
        C: Comparator + ?Sized,
    {
        match self.find_nearest(value, cmp)? {
            Nearest::Exact(_) => Err(OrderedArrayError::AlreadyExists),
            nearest => self.insert_at(nearest.insertion_point(), value),
        }
    }

    /// Returns the element equal to `value`, inserting `value` if there is none.
    pub fn find_or_insert<C>(&mut self, value: &[u8], cmp: &C) -> Result<Slot>
    where
        C: Comparator + ?Sized,
    {
        match self.find_nearest(value, cmp)? {
            Nearest::Exact(i) => Ok(Slot::Found(i)),
            nearest => self
                .insert_at(nearest.insertion_point(), value)
                .map(Slot::Inserted),
        }
    }

    /// Overwrites the element equal to `value`, inserting `value` if there is
    /// none.
    pub fn insert_or_replace<C>(&mut self, value: &[u8], cmp: &C) -> Result<Slot>
    where
        C: Comparator + ?Sized,
    {
        match self.find_nearest(value, cmp)? {
            Nearest::Exact(i) => {
                self.slot_mut(i).copy_from_slice(value);
                Ok(Slot::Found(i))
            }
            nearest => self
                .insert_at(nearest.insertion_point(), value)
                .map(Slot::Inserted),
        }
    }

    /// Overwrites the element equal to `value` in place.
    pub fn find_and_replace<C>(&mut self, value: &[u8], cmp: &C) -> Result<usize>
    where
        C: Comparator + ?Sized,
    {
        let index = self.find(value, cmp)?;
        self.slot_mut(index).copy_from_slice(value);
        Ok(index)
    }

    /// Removes the element equal to `key`.
    pub fn find_and_delete<C>(&mut self, key: &[u8], cmp: &C) -> Result<()>
    where
        C: Comparator + ?Sized,
    {
        let index = self.find(key, cmp)?;
        self.delete(index)
    }

    /// Appends `value` and moves it to `destination`, shifting the elements
    /// from `destination` on up by one. `None` leaves it at the end.
    ///
    /// The caller picks the position, so this can break the sort order; the
    /// keyed operations pass the insertion point from
    /// [`find_nearest`](Self::find_nearest).
    pub fn insert_at(&mut self, destination: Option<usize>, value: &[u8]) -> Result<usize> {
        if let Some(index) = destination.filter(|&i| i > self.len) {
            return Err(OrderedArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        let last = self.reserve_slot(Some(value))?;
        match destination {
            Some(index) if index < last => {
                rotate_right_carry(&mut self.blobs(), index, last);
                Ok(index)
            }
            _ => Ok(last),
        }
    }

    /// Removes the element at `index`, closing the gap.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let size = self.elem_size;
        self.bytes
            .copy_within((index + 1) * size..self.len * size, index * size);
        self.len -= 1;
        Ok(())
    }

    // =========================================================================
    // Slot shuffling
    // =========================================================================

    /// Exchanges two occupied slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        swap_regions(&mut self.bytes, a, b, self.elem_size);
        Ok(())
    }

    /// Moves the element at `y` to `x`, shifting `[x, y)` up by one.
    pub fn rotate_right_carry(&mut self, x: usize, y: usize) -> Result<()> {
        self.check_range(x, y)?;
        rotate_right_carry(&mut self.blobs(), x, y);
        Ok(())
    }

    /// Moves the element at `x` to `y`, shifting `(x, y]` down by one.
    pub fn rotate_left_carry(&mut self, x: usize, y: usize) -> Result<()> {
        self.check_range(x, y)?;
        rotate_left_carry(&mut self.blobs(), x, y);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[inline]
    fn slot(&self, index: usize) -> &[u8] {
        let start = index * self.elem_size;
        &self.bytes[start..start + self.elem_size]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        let start = index * self.elem_size;
        &mut self.bytes[start..start + self.elem_size]
    }

    fn blobs(&mut self) -> Blobs<'_> {
        Blobs::new(&mut self.bytes, self.elem_size, self.len)
    }

    #[inline]
    pub(crate) fn check_size(&self, value: &[u8]) -> Result<()> {
        if value.len() != self.elem_size {
            return Err(OrderedArrayError::ElementSize {
                expected: self.elem_size,
                actual: value.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(OrderedArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_range(&self, x: usize, y: usize) -> Result<()> {
        self.check_index(y)?;
        if x > y {
            return Err(OrderedArrayError::OutOfBounds {
                index: x,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for OrderedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a OrderedArray {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the elements of an [`OrderedArray`].
pub struct Iter<'a> {
    array: &'a OrderedArray,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.array.slot(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.array.slot(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
