//! Comparators over fixed-size byte elements.

use std::cmp::Ordering;

/// A total order over two elements of the container's element size.
///
/// `compare(key, element)` must be deterministic, and a container must be
/// driven with the same ordering for its whole life, otherwise the sorted
/// invariant no longer holds and lookups stop finding stored elements.
///
/// Any `Fn(&[u8], &[u8]) -> Ordering` is a comparator.
pub trait Comparator {
    /// Compares `key` against a stored `element`.
    fn compare(&self, key: &[u8], element: &[u8]) -> Ordering;
}

impl<F> Comparator for F
where
    F: Fn(&[u8], &[u8]) -> Ordering + ?Sized,
{
    #[inline]
    fn compare(&self, key: &[u8], element: &[u8]) -> Ordering {
        self(key, element)
    }
}

/// Lexicographic byte order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bytewise;

impl Comparator for Bytewise {
    #[inline]
    fn compare(&self, key: &[u8], element: &[u8]) -> Ordering {
        key.cmp(element)
    }
}

/// Lexicographic byte order after ASCII lowercasing, over the full element.
///
/// Fixed-width strings padded with `0x00` sort shorter-first, since the padding
/// byte is below every printable character.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitive;

impl Comparator for CaseInsensitive {
    fn compare(&self, key: &[u8], element: &[u8]) -> Ordering {
        key.iter()
            .map(u8::to_ascii_lowercase)
            .cmp(element.iter().map(u8::to_ascii_lowercase))
    }
}
