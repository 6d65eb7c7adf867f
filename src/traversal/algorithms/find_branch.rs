use core::fmt::{self, Formatter, Debug};
use crate::Branch;
use crate::traversal::{Visitor, VisitorDirection};

/// A `Visitor` which stops at the first branch, in depth-first order, whose value satisfies a predicate.
///
/// The value is only borrowed immutably for the duration of the predicate call.
#[derive(Copy, Clone)]
pub struct FindBranch<P> {
    predicate: P,
}
impl<P> FindBranch<P> {
    /// Creates the visitor from the predicate to test values with.
    #[inline]
    pub const fn new(predicate: P) -> Self {
        Self { predicate }
    }
}
impl<T, P> Visitor<T> for FindBranch<P>
where
    P: FnMut(&T) -> bool,
{
    type Output = Option<Branch<T>>;

    #[inline]
    fn visit(&mut self, branch: &Branch<T>, _: usize) -> VisitorDirection<Self::Output> {
        if (self.predicate)(&*branch.value()) {
            VisitorDirection::Stop(Some(branch.clone()))
        } else {
            VisitorDirection::Descend
        }
    }
    #[inline]
    fn finish(self) -> Self::Output {
        None
    }
}
impl<P> Debug for FindBranch<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindBranch").finish_non_exhaustive()
    }
}
