//! Ubiquitous algorithms for trees, implemented as [`Visitor`]s.
//!
//! This includes:
//! - Counting the branches of a subtree
//! - Searching a subtree for a value
//!
//! Both are also available as shorthand methods on [`Branch`].
//!
//! [`Visitor`]: ../trait.Visitor.html " "
//! [`Branch`]: ../../branch/struct.Branch.html " "

mod find_branch;
mod subtree_size;
pub use find_branch::*;
pub use subtree_size::*;
