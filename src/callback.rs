//! Capabilities a tree needs from its element type.
//!
//! A tree never inspects its elements directly: ordering goes through a
//! [`Compare`] and release goes through a [`Destroy`], both supplied at
//! construction. Closures implement both traits, so
//! `RbTree::with_callbacks(|a: &u32, b: &u32| b.cmp(a), drop)` builds a
//! descending tree.

use std::cmp::Ordering;
use std::fmt;

/// Total order over elements.
///
/// For a fixed pair of elements the result must not change during the lifetime
/// of the tree.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdCompare;

impl<T: Ord + ?Sized> Compare<T> for OrdCompare {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Releases an element the tree owns.
///
/// Called exactly once for every element that is deleted without being handed
/// back to the caller, replaced under [`DuplicatePolicy::Replace`](crate::DuplicatePolicy::Replace),
/// or still stored when the tree is cleared or dropped.
pub trait Destroy<T> {
    fn destroy(&mut self, element: T);
}

impl<T, F> Destroy<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn destroy(&mut self, element: T) {
        self(element)
    }
}

/// Releases elements by dropping them.
#[derive(Clone, Copy, Default)]
pub struct DropElement;

impl fmt::Debug for DropElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DropElement")
    }
}

impl<T> Destroy<T> for DropElement {
    #[inline]
    fn destroy(&mut self, element: T) {
        drop(element);
    }
}
