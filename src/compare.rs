// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Total orders over the element domain.

use std::cmp::Ordering;

/// A total order over values of type `T`.
///
/// The list assumes, but does not verify, that the order is consistent and
/// transitive across calls. Any `Fn(&T, &T) -> Ordering` is a comparator.
pub trait Comparator<T: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return self(a, b);
    }
}

/// Orders values by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return a.cmp(b);
    }
}
