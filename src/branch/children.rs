use alloc::vec::Vec;
use core::{
    cell::Ref,
    fmt::{self, Formatter, Debug},
    ops::Deref,
    slice,
};
use super::Branch;

/// The children of a branch, borrowed for as long as this guard lives.
///
/// Dereferences to a slice of handles in attachment order, so indexing, `first`, `last`, `len` and iterating all work as they do on slices. Every call to `iter` starts from the first child again.
///
/// Created by [`Branch::children`].
///
/// [`Branch::children`]: struct.Branch.html#method.children " "
pub struct Children<'a, T> {
    guard: Ref<'a, Vec<Branch<T>>>,
}
impl<'a, T> Children<'a, T> {
    #[inline]
    pub(super) fn new(guard: Ref<'a, Vec<Branch<T>>>) -> Self {
        Self { guard }
    }
    /// Returns the position of `child` among the children, comparing by identity, or `None` if it's not one of them.
    #[inline]
    pub fn position_of(&self, child: &Branch<T>) -> Option<usize> {
        self.guard.iter().position(|x| Branch::ptr_eq(x, child))
    }
    /// Returns `true` if `child` is one of the children, comparing by identity.
    #[inline]
    pub fn contains_branch(&self, child: &Branch<T>) -> bool {
        self.position_of(child).is_some()
    }
}
impl<T> Deref for Children<'_, T> {
    type Target = [Branch<T>];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}
impl<'b, T> IntoIterator for &'b Children<'_, T> {
    type Item = &'b Branch<T>;
    type IntoIter = slice::Iter<'b, Branch<T>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.guard.iter()
    }
}
impl<T> Clone for Children<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            guard: Ref::clone(&self.guard),
        }
    }
}
impl<T: Debug> Debug for Children<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.guard.iter()).finish()
    }
}
