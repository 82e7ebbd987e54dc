//! Nearest-match binary search.

use std::cmp::Ordering;

/// Outcome of a nearest-match search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nearest {
    /// The element at this index compares equal to the key. With several equal
    /// elements, this is the leftmost one.
    Exact(usize),
    /// No element matched; the element at this index is the smallest one
    /// greater than the key, so the key belongs just before it.
    Before(usize),
    /// The key is greater than every element (or there are none); it belongs
    /// at the end.
    End,
}

impl Nearest {
    /// Index of the exact match, if any.
    #[inline]
    pub fn exact(self) -> Option<usize> {
        match self {
            Nearest::Exact(i) => Some(i),
            _ => None,
        }
    }

    /// Where the key would be inserted: `None` means "at the end".
    #[inline]
    pub fn insertion_point(self) -> Option<usize> {
        match self {
            Nearest::Exact(i) | Nearest::Before(i) => Some(i),
            Nearest::End => None,
        }
    }
}

/// Transient state of one nearest-match query: the probe closure (which
/// carries the key and comparator) and the last probed slot the key was not
/// greater than.
struct Cursor<F> {
    probe: F,
    candidate: Option<(usize, Ordering)>,
}

impl<F> Cursor<F>
where
    F: FnMut(usize) -> Ordering,
{
    fn new(probe: F) -> Self {
        Self {
            probe,
            candidate: None,
        }
    }

    #[inline]
    fn probe(&mut self, index: usize) -> Ordering {
        let ordering = (self.probe)(index);
        if ordering != Ordering::Greater {
            self.candidate = Some((index, ordering));
        }
        ordering
    }

    fn finish(self) -> Nearest {
        match self.candidate {
            Some((index, Ordering::Equal)) => Nearest::Exact(index),
            Some((index, _)) => Nearest::Before(index),
            None => Nearest::End,
        }
    }
}

/// Binary search over `len` sorted slots.
///
/// `probe(i)` must return the comparison of the key against slot `i`. Probes
/// that find the key not greater than the slot record it as the insertion
/// candidate and narrow left; the search keeps narrowing left on equality,
/// so the final candidate is the leftmost slot not less than the key.
pub fn find_nearest_by<F>(len: usize, probe: F) -> Nearest
where
    F: FnMut(usize) -> Ordering,
{
    let mut cursor = Cursor::new(probe);
    let (mut lo, mut hi) = (0, len);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cursor.probe(mid) {
            Ordering::Greater => lo = mid + 1,
            Ordering::Less | Ordering::Equal => hi = mid,
        }
    }
    cursor.finish()
}
