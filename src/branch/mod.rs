//! Branches, the only kind of node there is, and the two operations which link them together.
//!
//! A [`Branch`] is a cheap handle to a shared node. Cloning a handle does not copy the node, it creates one more owner of it. A node is kept alive by:
//! - every handle to it which is held outside of the tree;
//! - its parent, as long as it is attached to one which is itself alive.
//!
//! The parent link is weak and is only ever used for lookups. Nothing but [`attach`] and [`detach`] (and their fallible variants) can change which branch is linked to which.
//!
//! # Example
//! ```rust
//! use sapling::{attach, detach, Branch};
//!
//! let first = Branch::new(1);
//! let second = Branch::new(2);
//! let child = Branch::new(3);
//!
//! attach(&first, &child);
//! assert_eq!(child.parent(), Some(first.clone()));
//!
//! // Moving a branch is a detach followed by an attach:
//! detach(&first, &child);
//! attach(&second, &child);
//! assert_eq!(first.num_children(), 0);
//! assert_eq!(*second.children()[0].value(), 3);
//! ```

use alloc::{
    rc::{Rc, Weak},
    vec::Vec,
};
use core::{
    cell::{Ref, RefCell, RefMut},
    fmt::{self, Formatter, Debug},
    hash::{Hash, Hasher},
    mem,
    ptr,
};
use tracing::{debug, trace};
use crate::{util::tree_corrupted, AttachError, DetachError};

mod children;
pub use children::Children;


struct Node<T> {
    value: RefCell<T>,
    parent: RefCell<Weak<Node<T>>>,
    children: RefCell<Vec<Branch<T>>>,
}
// The default teardown recurses once per level and overflows the stack on deep trees
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending = mem::take(self.children.get_mut());
        while let Some(child) = pending.pop() {
            // Branches held elsewhere keep their subtrees, which become trees of their own
            if Rc::strong_count(&child.0) == 1 {
                if let Ok(mut children) = child.0.children.try_borrow_mut() {
                    pending.append(&mut children);
                }
            }
        }
    }
}

/// A shared handle to a node of a tree.
///
/// Equality and hashing compare *identity*: two handles are equal if and only if they refer to the same node, regardless of the values stored.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
pub struct Branch<T>(Rc<Node<T>>);

impl<T> Branch<T> {
    /// Creates a branch with the specified value. The new branch is a root and has no children.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::Branch;
    /// let branch = Branch::new("Seedling");
    /// assert!(branch.is_root());
    /// assert_eq!(branch.num_children(), 0);
    /// assert!(branch.parent().is_none());
    /// ```
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Rc::new(Node {
            value: RefCell::new(value),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Returns `true` if the branch has no parent, `false` otherwise.
    ///
    /// A branch is a root if it was never attached, if it was detached, or if every owner of its former parent is gone.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.parent.borrow().strong_count() == 0
    }
    /// Returns a handle to the parent of the branch, or `None` if it's a root.
    ///
    /// The returned handle keeps the parent alive for as long as it is held. Storing it inside the tree's values would make the tree own itself and leak it.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }
    /// Returns the number of direct children of the branch.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.0.children.borrow().len()
    }
    /// Returns `true` if the branch has no children, `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.0.children.borrow().is_empty()
    }
    /// Returns the children of the branch, in the order in which they were attached.
    ///
    /// The returned guard dereferences to a slice of handles and can be iterated as many times as needed.
    ///
    /// While the guard is alive, attaching to or detaching from *this* branch fails with a `ChildrenBorrowed` error, since its list of children is borrowed.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::{attach, Branch};
    /// let root = Branch::new(0);
    /// for value in 1..=3 {
    ///     attach(&root, &Branch::new(value));
    /// }
    /// let children = root.children();
    /// let values = || children.iter().map(|child| *child.value()).collect::<Vec<_>>();
    /// assert_eq!(values(), [1, 2, 3]);
    /// // Iterating again starts over:
    /// assert_eq!(values(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn children(&self) -> Children<'_, T> {
        Children::new(self.0.children.borrow())
    }

    /// Immutably borrows the value stored in the branch.
    ///
    /// # Panics
    /// Panics if the value is currently mutably borrowed.
    #[inline]
    #[track_caller]
    pub fn value(&self) -> Ref<'_, T> {
        self.0.value.borrow()
    }
    /// Mutably borrows the value stored in the branch.
    ///
    /// # Panics
    /// Panics if the value is currently borrowed.
    #[inline]
    #[track_caller]
    pub fn value_mut(&self) -> RefMut<'_, T> {
        self.0.value.borrow_mut()
    }
    /// Overwrites the value stored in the branch, dropping the previous one.
    #[inline]
    #[track_caller]
    pub fn set_value(&self, value: T) {
        *self.value_mut() = value;
    }
    /// Replaces the value stored in the branch, returning the previous one.
    #[inline]
    #[track_caller]
    pub fn replace_value(&self, value: T) -> T {
        self.0.value.replace(value)
    }

    /// Creates a weak observer of the branch, which does not keep it alive.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::Branch;
    /// let branch = Branch::new(());
    /// let weak = branch.downgrade();
    /// assert!(!weak.is_expired());
    /// drop(branch);
    /// assert!(weak.is_expired());
    /// ```
    #[inline]
    pub fn downgrade(&self) -> WeakBranch<T> {
        WeakBranch(Rc::downgrade(&self.0))
    }
    /// Returns `true` if both handles refer to the same node.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
    /// Returns the number of strong owners of the branch: handles held outside of the tree, plus one if it's attached to a live parent.
    #[inline]
    pub fn strong_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
    /// Returns `true` if `self` is `other` or one of its ancestors. Takes time proportional to the depth of `other`.
    fn is_self_or_ancestor_of(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(branch) = current {
            if Self::ptr_eq(self, &branch) {
                return true;
            }
            current = branch.parent();
        }
        false
    }
}
impl<T> Clone for Branch<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}
impl<T: Default> Default for Branch<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl<T> From<T> for Branch<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
impl<T> PartialEq for Branch<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}
impl<T> Eq for Branch<T> {}
impl<T> Hash for Branch<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}
// Never follows the parent link, which would recurse forever
impl<T: Debug> Debug for Branch<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Branch");
        match self.0.value.try_borrow() {
            Ok(value) => debug.field("value", &*value),
            Err(..) => debug.field("value", &format_args!("<borrowed>")),
        };
        debug.field("is_root", &self.is_root());
        match self.0.children.try_borrow() {
            Ok(children) => debug.field("children", &*children),
            Err(..) => debug.field("children", &format_args!("<borrowed>")),
        };
        debug.finish()
    }
}

/// A weak observer of a [`Branch`], which can tell whether the branch is still alive without keeping it so.
///
/// [`Branch`]: struct.Branch.html " "
pub struct WeakBranch<T>(Weak<Node<T>>);

impl<T> WeakBranch<T> {
    /// Creates an observer which does not refer to anything. It is expired from the start.
    #[inline]
    pub const fn new() -> Self {
        Self(Weak::new())
    }
    /// Returns a handle to the observed branch, or `None` if it no longer exists.
    #[inline]
    pub fn upgrade(&self) -> Option<Branch<T>> {
        self.0.upgrade().map(Branch)
    }
    /// Returns `true` if the observed branch no longer exists, `false` otherwise.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.0.strong_count() == 0
    }
    /// Returns `true` if both observers refer to the same node.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.0.ptr_eq(&other.0)
    }
}
impl<T> Clone for WeakBranch<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}
impl<T> Default for WeakBranch<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
impl<T> Debug for WeakBranch<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakBranch")
            .field("expired", &self.is_expired())
            .finish()
    }
}

/// Appends `child` to the children of `parent` and links it back to `parent`.
///
/// # Panics
/// Panics in every case in which [`try_attach`] fails.
///
/// [`try_attach`]: fn.try_attach.html " "
#[track_caller]
pub fn attach<T>(parent: &Branch<T>, child: &Branch<T>) {
    if let Err(error) = try_attach(parent, child) {
        panic!("cannot attach branch: {}", error);
    }
}

/// Appends `child` to the children of `parent` and links it back to `parent`, or reports why it cannot.
///
/// Runs in amortized constant time. With debug assertions enabled, the ancestors of `parent` are also searched for `child`, which takes time proportional to the depth of `parent`.
///
/// # Errors
/// Will fail in the following scenarios, always without modifying either branch:
/// - `child` already has a live parent, and a branch can only be attached to one parent at a time;
/// - `child` is `parent` itself, or, with debug assertions enabled, one of its ancestors, so the tree would end up owning itself;
/// - the children of `parent` are currently borrowed through [`Branch::children`].
///
/// # Example
/// ```rust
/// use sapling::{attach, try_attach, AttachError, Branch};
///
/// let (first, second, child) = (Branch::new(1), Branch::new(2), Branch::new(3));
/// attach(&first, &child);
/// assert_eq!(try_attach(&second, &child), Err(AttachError::AlreadyAttached));
/// assert_eq!(try_attach(&second, &second), Err(AttachError::WouldCycle));
///
/// let borrowed = second.children();
/// assert_eq!(try_attach(&second, &Branch::new(4)), Err(AttachError::ChildrenBorrowed));
/// # drop(borrowed);
/// ```
///
/// [`Branch::children`]: struct.Branch.html#method.children " "
pub fn try_attach<T>(parent: &Branch<T>, child: &Branch<T>) -> Result<(), AttachError> {
    if !child.is_root() {
        let error = AttachError::AlreadyAttached;
        debug!(parent = ?parent.addr(), child = ?child.addr(), %error, "rejected attach");
        return Err(error);
    }
    let would_cycle = if cfg!(debug_assertions) {
        child.is_self_or_ancestor_of(parent)
    } else {
        Branch::ptr_eq(parent, child)
    };
    if would_cycle {
        let error = AttachError::WouldCycle;
        debug!(parent = ?parent.addr(), child = ?child.addr(), %error, "rejected attach");
        return Err(error);
    }
    let num_children = {
        let mut children = match parent.0.children.try_borrow_mut() {
            Ok(children) => children,
            Err(..) => {
                let error = AttachError::ChildrenBorrowed;
                debug!(parent = ?parent.addr(), child = ?child.addr(), %error, "rejected attach");
                return Err(error);
            }
        };
        children.push(child.clone());
        children.len()
    };
    *child.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
    trace!(parent = ?parent.addr(), child = ?child.addr(), num_children, "attached branch");
    Ok(())
}

/// Removes `child` from the children of `parent` and clears its parent link, turning it into a root.
///
/// If nothing else holds `child` or its descendants, they are dropped once the caller's handle is.
///
/// # Panics
/// Panics in every case in which [`try_detach`] fails.
///
/// [`try_detach`]: fn.try_detach.html " "
#[track_caller]
pub fn detach<T>(parent: &Branch<T>, child: &Branch<T>) {
    if let Err(error) = try_detach(parent, child) {
        panic!("cannot detach branch: {}", error);
    }
}

/// Removes `child` from the children of `parent` and clears its parent link, or reports that it isn't there.
///
/// Children are matched by identity, not by value. The order of the remaining children is preserved.
///
/// # Errors
/// Fails without modifying either branch if no child of `parent` is `child`, or if the children of `parent` are currently borrowed through [`Branch::children`].
///
/// # Example
/// ```rust
/// use sapling::{try_detach, DetachError, Branch};
///
/// let (parent, stranger) = (Branch::new("parent"), Branch::new("stranger"));
/// assert_eq!(try_detach(&parent, &stranger), Err(DetachError::NotAChild));
/// ```
///
/// [`Branch::children`]: struct.Branch.html#method.children " "
pub fn try_detach<T>(parent: &Branch<T>, child: &Branch<T>) -> Result<(), DetachError> {
    let (removed, num_children) = {
        let mut children = match parent.0.children.try_borrow_mut() {
            Ok(children) => children,
            Err(..) => {
                let error = DetachError::ChildrenBorrowed;
                debug!(parent = ?parent.addr(), child = ?child.addr(), %error, "rejected detach");
                return Err(error);
            }
        };
        let index = match children.iter().position(|x| Branch::ptr_eq(x, child)) {
            Some(index) => index,
            None => {
                let error = DetachError::NotAChild;
                debug!(parent = ?parent.addr(), child = ?child.addr(), %error, "rejected detach");
                return Err(error);
            }
        };
        let removed = children.remove(index);
        (removed, children.len())
    };
    let previous_parent = mem::take(&mut *child.0.parent.borrow_mut());
    if !ptr::eq(previous_parent.as_ptr(), Rc::as_ptr(&parent.0)) {
        tree_corrupted("a child of the parent did not link back to it");
    }
    trace!(parent = ?parent.addr(), child = ?child.addr(), num_children, "detached branch");
    // Only now can the subtree go away, if the caller's handle was the last one
    drop(removed);
    Ok(())
}
