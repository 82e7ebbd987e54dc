use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::error::{OrderedArrayError, Result};
use crate::growth::{max_len_for, Growth};
use crate::search::{find_nearest_by, Nearest};
use crate::shift::{rotate_left_carry, rotate_right_carry};
use crate::{Config, Slot, Stats};

/// A sorted vector of `T`, the typed counterpart of
/// [`OrderedArray`](crate::OrderedArray).
///
/// The `*_by` methods take a comparator `cmp(key, element)`; the unsuffixed
/// ones use `T: Ord`. As with `OrderedArray`, one ordering must be used
/// throughout. Capacity follows the same `2^k - 1` sequence.
pub struct SortedVec<T> {
    items: Vec<T>,
    growth: Growth,
}

impl<T> SortedVec<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            growth: Growth::new(max_len_for(std::mem::size_of::<T>())),
        }
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let limit = max_len_for(std::mem::size_of::<T>());
        let max_len = config.max_len.map_or(limit, |n| n.min(limit));
        let mut vec = Self {
            items: Vec::new(),
            growth: Growth::new(max_len),
        };
        let capacity = vec.growth.initial_capacity(config.initial_capacity);
        if capacity > 0 {
            vec.grow_to(capacity)?;
        }
        Ok(vec)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.growth.capacity()
    }

    #[inline]
    pub fn reallocations(&self) -> usize {
        self.growth.reallocations()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            len: self.len(),
            capacity: self.capacity(),
            elem_size: std::mem::size_of::<T>(),
            reallocations: self.reallocations(),
            buffer_bytes: self.items.capacity() * std::mem::size_of::<T>(),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn find_nearest_by<F>(&self, key: &T, mut cmp: F) -> Nearest
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        find_nearest_by(self.items.len(), |i| cmp(key, &self.items[i]))
    }

    pub fn find_by<F>(&self, key: &T, cmp: F) -> Result<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.find_nearest_by(key, cmp)
            .exact()
            .ok_or(OrderedArrayError::NotFound)
    }

    pub fn insert_by<F>(&mut self, value: T, cmp: F) -> Result<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.find_nearest_by(&value, cmp) {
            Nearest::Exact(_) => Err(OrderedArrayError::AlreadyExists),
            nearest => self.insert_at(nearest.insertion_point(), value),
        }
    }

    pub fn find_or_insert_by<F>(&mut self, value: T, cmp: F) -> Result<Slot>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.find_nearest_by(&value, cmp) {
            Nearest::Exact(i) => Ok(Slot::Found(i)),
            nearest => self
                .insert_at(nearest.insertion_point(), value)
                .map(Slot::Inserted),
        }
    }

    pub fn insert_or_replace_by<F>(&mut self, value: T, cmp: F) -> Result<Slot>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.find_nearest_by(&value, cmp) {
            Nearest::Exact(i) => {
                self.items[i] = value;
                Ok(Slot::Found(i))
            }
            nearest => self
                .insert_at(nearest.insertion_point(), value)
                .map(Slot::Inserted),
        }
    }

    /// Replaces the element equal to `value`, returning its index.
    pub fn find_and_replace_by<F>(&mut self, value: T, cmp: F) -> Result<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let index = self.find_by(&value, cmp)?;
        self.items[index] = value;
        Ok(index)
    }

    /// Removes and returns the element equal to `key`.
    pub fn find_and_delete_by<F>(&mut self, key: &T, cmp: F) -> Result<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let index = self.find_by(key, cmp)?;
        self.remove(index)
    }

    /// Appends `value` and returns its index, growing by the `2 * len + 1`
    /// policy when full. The sort order is the caller's concern.
    pub fn reserve_slot(&mut self, value: T) -> Result<usize> {
        if let Some(slots) = self.growth.plan(self.items.len())? {
            self.grow_to(slots)?;
        }
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    /// Appends `value` and rotates it to `destination` (`None`: stay at the end).
    pub fn insert_at(&mut self, destination: Option<usize>, value: T) -> Result<usize> {
        let len = self.items.len();
        if let Some(index) = destination.filter(|&i| i > len) {
            return Err(OrderedArrayError::OutOfBounds { index, len });
        }

        let last = self.reserve_slot(value)?;
        match destination {
            Some(index) if index < last => {
                rotate_right_carry(self.items.as_mut_slice(), index, last);
                Ok(index)
            }
            _ => Ok(last),
        }
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// down by one.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.items.len();
        if index >= len {
            return Err(OrderedArrayError::OutOfBounds { index, len });
        }
        rotate_left_carry(self.items.as_mut_slice(), index, len - 1);
        self.items.pop().ok_or(OrderedArrayError::OutOfBounds { index, len })
    }

    fn grow_to(&mut self, slots: usize) -> Result<()> {
        let additional = slots - self.items.len();
        if let Err(source) = self.items.try_reserve_exact(additional) {
            debug!(slots, "allocation failed");
            return Err(OrderedArrayError::AllocationFailure { slots, source });
        }
        self.growth.commit(slots);
        Ok(())
    }
}

impl<T: Ord> SortedVec<T> {
    pub fn find(&self, key: &T) -> Result<usize> {
        self.find_by(key, T::cmp)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_ok()
    }

    pub fn insert(&mut self, value: T) -> Result<usize> {
        self.insert_by(value, T::cmp)
    }

    pub fn find_or_insert(&mut self, value: T) -> Result<Slot> {
        self.find_or_insert_by(value, T::cmp)
    }

    pub fn insert_or_replace(&mut self, value: T) -> Result<Slot> {
        self.insert_or_replace_by(value, T::cmp)
    }

    pub fn remove_key(&mut self, key: &T) -> Result<T> {
        self.find_and_delete_by(key, T::cmp)
    }
}

impl<T: Clone> Clone for SortedVec<T> {
    /// The clone gets the full logical capacity up front, so its next append
    /// follows the same growth schedule as the original.
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.growth.capacity());
        items.extend_from_slice(&self.items);
        Self {
            items,
            growth: self.growth.clone(),
        }
    }
}

impl<T> Default for SortedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a SortedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
