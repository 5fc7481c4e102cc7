//! B-tree implementation.
//!
//! This module provides an in-memory B-tree of fixed minimum degree that supports:
//! - Point lookups (search)
//! - Insertions with preemptive splitting (insert)
//! - Deletions with substitution, merging and optional borrowing (delete)
//! - Rendering, export and invariant checks

mod node;
mod render;
mod tree;
mod verify;

pub use node::Node;
pub use tree::BTree;
