//! Everything related to walking a tree from one of its branches.
//!
//! The module is home to the following items:
//! - [`Ancestors`] and [`Descendants`], iterators going up and down the tree from a branch
//! - [`Visitor`], a *trait for types which describe algorithms with state*, driven over a subtree by [`Branch::traverse`]
//! - Implementations of ubiquitous algorithms for trees (see the [`algorithms`] module for more)
//!
//! All of the iterators hold handles rather than borrows, so the tree can be inspected and even reshaped while they are alive. Reshaping the part of the tree which has not been reached yet affects what they yield.
//!
//! [`algorithms`]: algorithms/index.html " "
//! [`Ancestors`]: struct.Ancestors.html " "
//! [`Descendants`]: struct.Descendants.html " "
//! [`Visitor`]: trait.Visitor.html " "
//! [`Branch::traverse`]: ../branch/struct.Branch.html#method.traverse " "

pub mod algorithms;


use alloc::vec::Vec;
use core::{
    fmt::{self, Formatter, Debug},
    iter::FusedIterator,
};
use crate::Branch;
use algorithms::{FindBranch, SubtreeSize};

impl<T> Branch<T> {
    /// Returns an iterator over the ancestors of the branch, starting with its parent and ending with the root of its tree.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<T> {
        Ancestors { next: self.parent() }
    }
    /// Returns the root of the tree the branch is in, which is the branch itself if it has no parent.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::{attach, Branch};
    /// let root = Branch::new('r');
    /// let middle = Branch::new('m');
    /// let leaf = Branch::new('l');
    /// attach(&root, &middle);
    /// attach(&middle, &leaf);
    /// assert_eq!(leaf.root(), root);
    /// assert_eq!(root.root(), root);
    /// ```
    #[inline]
    pub fn root(&self) -> Self {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }
    /// Returns the number of ancestors of the branch, which is zero for a root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
    /// Returns `true` if the branch is a strict ancestor of `other`, `false` otherwise.
    #[inline]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.ancestors().any(|ancestor| Self::ptr_eq(&ancestor, self))
    }
    /// Returns a depth-first iterator over the branch and all of its descendants.
    ///
    /// The branch itself comes first, and every branch comes before its children, which are visited in the order of attachment.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::{attach, Branch};
    /// let root = Branch::new(0);
    /// let (a, b) = (Branch::new(1), Branch::new(3));
    /// attach(&root, &a);
    /// attach(&root, &b);
    /// attach(&a, &Branch::new(2));
    ///
    /// let values: Vec<_> = root.descendants().map(|x| *x.value()).collect();
    /// assert_eq!(values, [0, 1, 2, 3]);
    /// ```
    #[inline]
    pub fn descendants(&self) -> Descendants<T> {
        let mut stack = Vec::new();
        stack.push(self.clone());
        Descendants { stack }
    }
    /// Drives the visitor over the branch and its descendants in depth-first order, returning the final result of the visitor.
    ///
    /// The result is either the value the visitor stopped with or, if it never stopped, the value produced by [`Visitor::finish`].
    ///
    /// [`Visitor::finish`]: trait.Visitor.html#tymethod.finish " "
    pub fn traverse<V: Visitor<T>>(&self, mut visitor: V) -> V::Output {
        let mut stack = Vec::new();
        stack.push((self.clone(), 0_usize));
        while let Some((branch, depth)) = stack.pop() {
            match visitor.visit(&branch, depth) {
                VisitorDirection::Descend => {
                    let children = branch.children();
                    stack.extend(children.iter().rev().map(|child| (child.clone(), depth + 1)));
                }
                VisitorDirection::SkipChildren => {}
                VisitorDirection::Stop(output) => return output,
            }
        }
        visitor.finish()
    }

    /// Returns the number of branches in the subtree starting at this branch, including the branch itself.
    #[inline]
    pub fn subtree_size(&self) -> usize {
        self.traverse(SubtreeSize::new())
    }
    /// Returns the first branch in depth-first order, starting with this one, whose value satisfies the predicate.
    #[inline]
    pub fn find<P>(&self, predicate: P) -> Option<Self>
    where
        P: FnMut(&T) -> bool,
    {
        self.traverse(FindBranch::new(predicate))
    }
}

/// Iterator-like structures which walk a subtree and compute something from it.
///
/// Visitors receive every branch they asked to reach together with its depth relative to the branch the traversal started from, and decide where to go next.
pub trait Visitor<T> {
    /// The final value produced by the visitor.
    type Output;
    /// Visit the provided branch, returning further directions for traversal.
    fn visit(&mut self, branch: &Branch<T>, depth: usize) -> VisitorDirection<Self::Output>;
    /// Produces the final value if the traversal ran out of branches before the visitor stopped it.
    fn finish(self) -> Self::Output;
}
/// The direction in which a visitor wishes to go after visiting a branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisitorDirection<V> {
    /// Visit the children of the branch, then carry on with its siblings.
    Descend,
    /// Do not visit the children of the branch, carry on with its siblings.
    SkipChildren,
    /// Stop the traversal, producing a final value.
    Stop(V),
}

/// An iterator over the ancestors of a branch, from its parent up to the root.
///
/// Created by [`Branch::ancestors`].
///
/// [`Branch::ancestors`]: ../branch/struct.Branch.html#method.ancestors " "
pub struct Ancestors<T> {
    next: Option<Branch<T>>,
}
impl<T> Iterator for Ancestors<T> {
    type Item = Branch<T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}
impl<T> FusedIterator for Ancestors<T> {}
impl<T> Clone for Ancestors<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
        }
    }
}
impl<T> Debug for Ancestors<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ancestors")
            .field("finished", &self.next.is_none())
            .finish()
    }
}

/// A depth-first iterator over a branch and its descendants.
///
/// Created by [`Branch::descendants`].
///
/// [`Branch::descendants`]: ../branch/struct.Branch.html#method.descendants " "
pub struct Descendants<T> {
    stack: Vec<Branch<T>>,
}
impl<T> Iterator for Descendants<T> {
    type Item = Branch<T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        {
            let children = current.children();
            self.stack.extend(children.iter().rev().cloned());
        }
        Some(current)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}
impl<T> FusedIterator for Descendants<T> {}
impl<T> Clone for Descendants<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}
impl<T> Debug for Descendants<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descendants")
            .field("pending", &self.stack.len())
            .finish()
    }
}
