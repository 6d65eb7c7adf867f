//! A reference-counted tree in which every branch owns its children and merely observes its parent.
//!
//! # Overview
//! Sapling implements the simplest tree there is: a [`Branch`] holds a value, an ordered list of child branches and a *weak* link to the branch it was attached to. Ownership flows strictly downward: a parent keeps its children alive, a child never keeps its parent alive. This has two consequences which are the whole point of the crate:
//! - a subtree is freed as soon as nobody holds a handle to it or to any of its ancestors, without any teardown code;
//! - if a handle to a child outlives every handle to its ancestors, the child simply becomes the root of a new, independent tree.
//!
//! The shape of a tree only ever changes through two free functions, [`attach`] and [`detach`]. Moving a branch from one parent to another is done by calling both; there is intentionally no atomic reparenting operation.
//!
//! # Example
//! ```rust
//! use sapling::{attach, detach, Branch};
//!
//! let root = Branch::new("root");
//! let weak_leaf = {
//!     let branch = Branch::new("branch");
//!     let leaf = Branch::new("leaf");
//!     attach(&root, &branch);
//!     attach(&branch, &leaf);
//!     // Our own handles go out of scope here, but the root still owns the whole chain.
//!     leaf.downgrade()
//! };
//! assert!(!weak_leaf.is_expired());
//!
//! // Taking the branch away from the root without keeping a handle to it frees the subtree.
//! let branch = root.children()[0].clone();
//! detach(&root, &branch);
//! assert!(branch.is_root());
//! drop(branch);
//! assert!(weak_leaf.is_expired());
//! ```
//!
//! # Errors and panics
//! Every way of misusing [`attach`] and [`detach`] is a programming error, so the plain functions panic. Their [`try_attach`] and [`try_detach`] counterparts report the same conditions as [`AttachError`] and [`DetachError`] instead, leaving the tree untouched.
//!
//! # Threads
//! Branches are built on [`Rc`] and `RefCell` and therefore are neither `Send` nor `Sync`. A tree lives on one thread.
//!
//! # Feature flags
//! - `std` (**enabled by default**): enables standard library support in dependencies. Without it the crate is `no_std` and only requires `alloc`.
//! - `unwind_safety` (**enabled by default**): if an internal consistency check ever fails, abort the process instead of unwinding through a corrupted tree.
//! - `traversal` (**enabled by default**): adds the [`traversal`] module: ancestor and descendant iterators, visitors and a couple of ready-made algorithms.
//! - `doc_cfg`: annotates feature-gated items on docs.rs. **Requires a nightly compiler.**
//!
//! [`Rc`]: https://doc.rust-lang.org/std/rc/struct.Rc.html " "
//! [`traversal`]: traversal/index.html " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::copy_iterator,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

pub mod branch;
#[doc(no_inline)]
pub use branch::{attach, detach, try_attach, try_detach, Branch, Children, WeakBranch};

#[cfg(feature = "traversal")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "traversal")))]
pub mod traversal;
#[cfg(feature = "traversal")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "traversal")))]
pub use traversal::{Visitor, VisitorDirection};

/// A prelude for using Sapling, containing the most used items in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::branch::{
        attach as attach_branch,
        detach as detach_branch,
        try_attach as try_attach_branch,
        try_detach as try_detach_branch,
        Branch,
        WeakBranch,
    };
    #[cfg(feature = "traversal")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "traversal")))]
    #[doc(no_inline)]
    pub use crate::traversal::{
        Visitor as BranchVisitor,
        VisitorDirection as BranchVisitorDirection,
    };
}

pub(crate) mod util;

use thiserror::Error;

/// The error type returned by [`try_attach`] when the requested link would break the tree.
///
/// [`try_attach`]: branch/fn.try_attach.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum AttachError {
    /// The prospective child already has a live parent. A branch can only have one; detach it first.
    #[error("the prospective child already has a parent")]
    AlreadyAttached,
    /// The prospective child is the prospective parent itself or one of its ancestors, which would make the tree own itself.
    ///
    /// Only the branch itself is checked in release builds. Attaching a root under one of its own descendants is caught with debug assertions enabled, and leaks the tree otherwise.
    #[error("the prospective child is the parent itself or one of its ancestors")]
    WouldCycle,
    /// The children of the prospective parent are borrowed through [`Branch::children`] and cannot be modified.
    ///
    /// [`Branch::children`]: branch/struct.Branch.html#method.children " "
    #[error("the children of the parent are currently borrowed")]
    ChildrenBorrowed,
}

/// The error type returned by [`try_detach`] when the branch to be removed is not a child of the specified parent.
///
/// [`try_detach`]: branch/fn.try_detach.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum DetachError {
    /// No entry of the parent's children refers to the specified branch.
    #[error("the branch is not a child of the specified parent")]
    NotAChild,
    /// The children of the parent are borrowed through [`Branch::children`] and cannot be modified.
    ///
    /// [`Branch::children`]: branch/struct.Branch.html#method.children " "
    #[error("the children of the parent are currently borrowed")]
    ChildrenBorrowed,
}
