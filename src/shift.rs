//! Swap and one-slot "carry" rotations over a run of slots.
//!
//! Rotations are written as a walk of pairwise swaps so that they work the same
//! way over typed slices and over a buffer of fixed-size byte blobs.

/// Anything addressable as a sequence of swappable slots.
pub trait Slots {
    /// Number of addressable slots.
    fn slot_count(&self) -> usize;

    /// Exchanges the contents of slots `a` and `b`.
    fn swap_slots(&mut self, a: usize, b: usize);
}

impl<T> Slots for [T] {
    #[inline]
    fn slot_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }
}

/// A byte buffer viewed as `len` consecutive blobs of `size` bytes.
pub struct Blobs<'a> {
    buf: &'a mut [u8],
    size: usize,
    len: usize,
}

impl<'a> Blobs<'a> {
    /// Views the first `len * size` bytes of `buf` as `len` slots.
    ///
    /// # Panics
    /// Panics if `buf` holds fewer than `len * size` bytes.
    pub fn new(buf: &'a mut [u8], size: usize, len: usize) -> Self {
        assert!(
            size.checked_mul(len).is_some_and(|n| n <= buf.len()),
            "{len} slots of {size} bytes do not fit in {} bytes",
            buf.len()
        );
        Self { buf, size, len }
    }
}

impl Slots for Blobs<'_> {
    #[inline]
    fn slot_count(&self) -> usize {
        self.len
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.len && b < self.len);
        swap_regions(self.buf, a, b, self.size);
    }
}

/// Exchanges the `size`-byte regions at slot `a` and slot `b` of `buf`.
#[inline]
pub fn swap_regions(buf: &mut [u8], a: usize, b: usize, size: usize) {
    if a == b || size == 0 {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = buf.split_at_mut(hi * size);
    head[lo * size..(lo + 1) * size].swap_with_slice(&mut tail[..size]);
}

/// Rotates the inclusive range `[x, y]` right by one slot: the element at `y`
/// lands on `x` and everything else moves one slot towards `y`.
///
/// Each step swaps the walking position with the fixed endpoint `y`, so the
/// endpoint keeps relaying the displaced element forward.
pub fn rotate_right_carry<S: Slots + ?Sized>(slots: &mut S, x: usize, y: usize) {
    debug_assert!(x <= y && y < slots.slot_count());
    for i in x..y {
        slots.swap_slots(i, y);
    }
}

/// Rotates the inclusive range `[x, y]` left by one slot: the element at `x`
/// lands on `y` and everything else moves one slot towards `x`.
pub fn rotate_left_carry<S: Slots + ?Sized>(slots: &mut S, x: usize, y: usize) {
    debug_assert!(x <= y && y < slots.slot_count());
    for i in x..y {
        slots.swap_slots(i, i + 1);
    }
}
