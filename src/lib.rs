//! # BTree Core
//!
//! An in-memory B-tree of fixed minimum degree over integer keys.
//!
//! ## Architecture
//!
//! - **Types** (`types`): key type, degree limits and tree configuration
//! - **B-Tree Layer** (`btree`): nodes, search, insert/split, delete/merge,
//!   rendering and invariant checks
//! - **Harness** (`harness`): the interactive text session driving a tree
//!
//! ## Usage
//!
//! ```rust
//! use btree_core::BTree;
//!
//! let mut tree = BTree::new(3)?;
//!
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//! assert!(tree.search(6));
//!
//! tree.delete(6);
//! assert!(!tree.search(6));
//!
//! for line in tree.render() {
//!     println!("{}", line);
//! }
//! # Ok::<(), btree_core::TreeError>(())
//! ```

pub mod btree;
pub mod error;
pub mod harness;
pub mod types;

pub use error::{Result, TreeError};
pub use types::{BTreeConfig, DuplicatePolicy, Key, UnderflowPolicy, MAX_DEGREE, MIN_DEGREE};

// Re-export main public API
pub use btree::{BTree, Node};
pub use harness::{Session, SessionReport};

use serde::{Deserialize, Serialize};

/// Node type for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<Key>,
    /// Child nodes (only for internal nodes)
    pub children: Vec<TreeNode>,
}

/// Tree statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Number of levels
    pub height: usize,
    /// Total number of nodes
    pub node_count: usize,
    /// Number of leaf nodes
    pub leaf_count: usize,
    /// Number of key entries
    pub key_count: usize,
    /// Minimum degree the tree was built with
    pub min_degree: usize,
}
