//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - search: Point lookups
//! - insert: Top-down insertion with preemptive splits
//! - delete: Removal with predecessor/successor substitution and merging

use tracing::{debug, trace};

use super::node::Node;
use crate::error::Result;
use crate::types::{BTreeConfig, DuplicatePolicy, Key, UnderflowPolicy};

/// An in-memory B-tree of fixed minimum degree
#[derive(Debug, Clone)]
pub struct BTree {
    /// Root node (an empty leaf for an empty tree)
    pub(crate) root: Node,
    /// Tree configuration
    pub(crate) config: BTreeConfig,
}

impl BTree {
    /// Create an empty tree with minimum degree `min_degree` and default policies
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an empty tree with the given configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            min_degree = config.min_degree,
            duplicates = ?config.duplicates,
            underflow = ?config.underflow,
            "created btree"
        );
        Ok(Self {
            root: Node::new(),
            config,
        })
    }

    /// Get the tree configuration
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// Get the minimum degree `t`
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Get the root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of key entries in the tree
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    /// Check if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.root.is_leaf()
    }

    /// Number of levels, counting the root (1 for an empty tree)
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Some(first) = node.children.first() {
            node = first;
            height += 1;
        }
        height
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        self.root.collect_keys(&mut keys);
        keys
    }

    /// Check whether `key` is stored in the tree
    pub fn search(&self, key: Key) -> bool {
        let mut node = &self.root;
        loop {
            let i = node.first_index_not_less(key);
            if node.keys.get(i) == Some(&key) {
                return true;
            }
            if node.is_leaf() {
                return false;
            }
            node = &node.children[i];
        }
    }

    /// Insert a key.
    ///
    /// Returns `true` if a key entry was added. Under
    /// [`DuplicatePolicy::Ignore`] inserting a present key returns `false`.
    pub fn insert(&mut self, key: Key) -> bool {
        if self.config.duplicates == DuplicatePolicy::Ignore && self.search(key) {
            trace!(key, "ignoring duplicate key");
            return false;
        }

        let t = self.config.min_degree;
        if self.root.is_full(t) {
            let old_root = std::mem::take(&mut self.root);
            self.root.children.push(old_root);
            self.root.split_child(0, t);
            debug!(
                separator = self.root.keys[0],
                height = self.height(),
                "split full root"
            );
        }

        Self::insert_non_full(&mut self.root, key, t);
        trace!(key, "inserted key");
        true
    }

    /// Descend from a node known not to be full, splitting full children
    /// before entering them.
    fn insert_non_full(node: &mut Node, key: Key, t: usize) {
        let mut i = node.first_index_greater(key);
        if node.is_leaf() {
            node.keys.insert(i, key);
            return;
        }

        if node.children[i].is_full(t) {
            node.split_child(i, t);
            trace!(separator = node.keys[i], "split full child");
            if key > node.keys[i] {
                i += 1;
            }
        }
        Self::insert_non_full(&mut node.children[i], key, t);
    }

    /// Delete one entry of `key`.
    ///
    /// Returns `true` if an entry was removed; deleting an absent key is a no-op.
    pub fn delete(&mut self, key: Key) -> bool {
        let t = self.config.min_degree;
        let removed = match self.config.underflow {
            UnderflowPolicy::Tolerate => Self::delete_tolerant(&mut self.root, key, t),
            UnderflowPolicy::Repair => Self::delete_repairing(&mut self.root, key, t),
        };

        if self.root.is_empty() && !self.root.is_leaf() {
            let child = self.root.children.remove(0);
            self.root = child;
            debug!(height = self.height(), "collapsed empty root");
        }

        trace!(key, removed, "delete");
        removed
    }

    /// Delete without rebalancing: leaves may fall below `t - 1` keys and
    /// children are entered as they are.
    fn delete_tolerant(node: &mut Node, key: Key, t: usize) -> bool {
        let i = node.first_index_not_less(key);
        let found = node.keys.get(i) == Some(&key);

        match (found, node.is_leaf()) {
            (true, true) => {
                node.keys.remove(i);
                true
            }
            (true, false) => Self::delete_internal_tolerant(node, i, t),
            (false, false) => Self::delete_tolerant(&mut node.children[i], key, t),
            (false, true) => false,
        }
    }

    /// Remove `node.keys[index]` from an internal node by substituting its
    /// predecessor or successor, or by merging the two children around it.
    fn delete_internal_tolerant(node: &mut Node, index: usize, t: usize) -> bool {
        let key = node.keys[index];

        if node.children[index].len() >= t {
            if let Some(pred) = Self::take_max(&mut node.children[index], t) {
                node.keys[index] = pred;
                return true;
            }
        }
        if node.children[index + 1].len() >= t {
            if let Some(succ) = Self::take_min(&mut node.children[index + 1], t) {
                node.keys[index] = succ;
                return true;
            }
        }

        // Both children hold fewer than t keys, so the merged node fits in 2t - 1
        node.merge_children(index);
        debug!(key, "merged children around deleted key");
        Self::delete_tolerant(&mut node.children[index], key, t)
    }

    /// Remove and return the largest key of a subtree.
    ///
    /// Tolerated underflow can leave the rightmost leaf empty; the maximum is
    /// then the last key of the deepest non-empty node on the rightmost path,
    /// removed as an internal key.
    fn take_max(node: &mut Node, t: usize) -> Option<Key> {
        if node.is_leaf() {
            return node.keys.pop();
        }
        let last = node.children.len() - 1;
        if let Some(key) = Self::take_max(&mut node.children[last], t) {
            return Some(key);
        }

        let index = node.keys.len().checked_sub(1)?;
        let key = node.keys[index];
        Self::delete_internal_tolerant(node, index, t);
        Some(key)
    }

    /// Remove and return the smallest key of a subtree, mirroring [`Self::take_max`].
    fn take_min(node: &mut Node, t: usize) -> Option<Key> {
        if node.is_leaf() {
            if node.keys.is_empty() {
                return None;
            }
            return Some(node.keys.remove(0));
        }
        if let Some(key) = Self::take_min(&mut node.children[0], t) {
            return Some(key);
        }

        let key = *node.keys.first()?;
        Self::delete_internal_tolerant(node, 0, t);
        Some(key)
    }

    /// Single-pass delete that tops up every child to at least `t` keys before
    /// descending into it, so no non-root node ends below `t - 1` keys.
    fn delete_repairing(node: &mut Node, key: Key, t: usize) -> bool {
        let i = node.first_index_not_less(key);
        let found = node.keys.get(i) == Some(&key);

        if found {
            if node.is_leaf() {
                node.keys.remove(i);
                return true;
            }
            return Self::delete_internal_repairing(node, i, t);
        }

        if node.is_leaf() {
            return false;
        }

        let i = if node.children[i].len() < t {
            Self::fill_child(node, i, t)
        } else {
            i
        };
        Self::delete_repairing(&mut node.children[i], key, t)
    }

    fn delete_internal_repairing(node: &mut Node, index: usize, t: usize) -> bool {
        let key = node.keys[index];

        if node.children[index].len() >= t {
            if let Some(pred) = node.children[index].max_key() {
                node.keys[index] = pred;
                return Self::delete_repairing(&mut node.children[index], pred, t);
            }
        }
        if node.children[index + 1].len() >= t {
            if let Some(succ) = node.children[index + 1].min_key() {
                node.keys[index] = succ;
                return Self::delete_repairing(&mut node.children[index + 1], succ, t);
            }
        }

        node.merge_children(index);
        debug!(key, "merged children around deleted key");
        Self::delete_repairing(&mut node.children[index], key, t)
    }

    /// Bring `node.children[index]` up to at least `t` keys. Returns the index of
    /// the child that now covers the original child's key range.
    fn fill_child(node: &mut Node, index: usize, t: usize) -> usize {
        let last = node.keys.len();

        if index > 0 && node.children[index - 1].len() >= t && node.borrow_from_left(index) {
            debug!(index, "borrowed key from left sibling");
            return index;
        }
        if index < last && node.children[index + 1].len() >= t && node.borrow_from_right(index) {
            debug!(index, "borrowed key from right sibling");
            return index;
        }

        if index < last {
            node.merge_children(index);
            debug!(index, "merged child with right sibling");
            index
        } else {
            node.merge_children(index - 1);
            debug!(index = index - 1, "merged child with left sibling");
            index - 1
        }
    }
}
