use crate::Branch;
use crate::traversal::{Visitor, VisitorDirection};

/// A `Visitor` which counts the branches of a subtree, including the one the traversal starts from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubtreeSize {
    visited: usize,
}
impl SubtreeSize {
    /// Creates the visitor with nothing counted yet.
    #[inline]
    pub const fn new() -> Self {
        Self { visited: 0 }
    }
}
impl<T> Visitor<T> for SubtreeSize {
    type Output = usize;

    #[inline]
    fn visit(&mut self, _: &Branch<T>, _: usize) -> VisitorDirection<Self::Output> {
        self.visited += 1;
        VisitorDirection::Descend
    }
    #[inline]
    fn finish(self) -> Self::Output {
        self.visited
    }
}
