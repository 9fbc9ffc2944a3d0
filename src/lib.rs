//! Ordered maps backed by self-balancing binary search trees.
//!
//! Two balancing strategies are offered over one shared tree substrate:
//!
//! - [`avl_tree::AvlMap`] keeps the heights of any node's two subtrees within
//!   one of each other and restores that bound with four rotation cases.
//! - [`red_black_tree::RedBlackMap`] keeps a two-color invariant with equal
//!   black counts on every root-to-leaf path and restores it with the classic
//!   recoloring and rotation case analysis.
//!
//! Both maps implement the [`OrderedMap`] contract, so callers can treat the
//! strategies as interchangeable. Every mutation reports its outcome as a
//! value: duplicate insertions and removals of absent keys return an [`Error`]
//! and leave the map untouched.

#[macro_use]
extern crate serde_derive;

mod entry;
mod map;
mod tree;

pub mod avl_tree;
pub mod red_black_tree;

pub use crate::map::{Error, OrderedMap};
