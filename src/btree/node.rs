//! B-tree node.
//!
//! A node holds its keys in ascending order and, when internal, exactly
//! `keys.len() + 1` children that it owns outright. The structural primitives
//! (split, merge, borrow) are expressed on the parent, which owns both sides of
//! every operation.

use crate::types::Key;

/// A node of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Keys in ascending order
    pub(crate) keys: Vec<Key>,
    /// Children (empty for leaves)
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Create an empty leaf node
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys held by this node
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Children of this node
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys in this node
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if this node holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if this node holds `2t - 1` keys
    pub fn is_full(&self, min_degree: usize) -> bool {
        self.keys.len() >= 2 * min_degree - 1
    }

    /// Smallest index `i` with `key <= keys[i]`, or `keys.len()`
    pub(crate) fn first_index_not_less(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Smallest index `i` with `key < keys[i]`, or `keys.len()`
    pub(crate) fn first_index_greater(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k <= key)
    }

    /// Split the full child at `index`.
    ///
    /// The child's median (`keys[t - 1]`) moves up into `self.keys[index]`, the
    /// upper `t - 1` keys (and upper `t` children) move into a new sibling
    /// inserted at `self.children[index + 1]`.
    pub(crate) fn split_child(&mut self, index: usize, min_degree: usize) {
        let t = min_degree;
        let child = &mut self.children[index];

        let mut sibling = Node::new();
        sibling.keys = child.keys.split_off(t);
        if !child.is_leaf() {
            sibling.children = child.children.split_off(t);
        }
        let median = child.keys.remove(t - 1);

        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);
    }

    /// Merge `children[index + 1]` and the separator `keys[index]` into
    /// `children[index]`. The parent loses one key and one child.
    pub(crate) fn merge_children(&mut self, index: usize) {
        let separator = self.keys.remove(index);
        let right = self.children.remove(index + 1);
        let left = &mut self.children[index];

        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);
    }

    /// Rotate the last key of `children[index - 1]` through the parent into the
    /// front of `children[index]`. Returns `false` if there is nothing to borrow.
    pub(crate) fn borrow_from_left(&mut self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        let (before, after) = self.children.split_at_mut(index);
        let left = &mut before[index - 1];
        let child = &mut after[0];

        let Some(donated) = left.keys.pop() else {
            return false;
        };
        let separator = std::mem::replace(&mut self.keys[index - 1], donated);
        child.keys.insert(0, separator);
        if let Some(grandchild) = left.children.pop() {
            child.children.insert(0, grandchild);
        }
        true
    }

    /// Rotate the first key of `children[index + 1]` through the parent onto the
    /// end of `children[index]`. Returns `false` if there is nothing to borrow.
    pub(crate) fn borrow_from_right(&mut self, index: usize) -> bool {
        if index + 1 >= self.children.len() {
            return false;
        }
        let (before, after) = self.children.split_at_mut(index + 1);
        let child = &mut before[index];
        let right = &mut after[0];

        if right.keys.is_empty() {
            return false;
        }
        let donated = right.keys.remove(0);
        let separator = std::mem::replace(&mut self.keys[index], donated);
        child.keys.push(separator);
        if !right.is_leaf() {
            child.children.push(right.children.remove(0));
        }
        true
    }

    /// Largest key in this subtree, following the rightmost path
    pub(crate) fn max_key(&self) -> Option<Key> {
        let mut node = self;
        while let Some(last) = node.children.last() {
            node = last;
        }
        node.keys.last().copied()
    }

    /// Smallest key in this subtree, following the leftmost path
    pub(crate) fn min_key(&self) -> Option<Key> {
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
        }
        node.keys.first().copied()
    }

    /// Number of keys in this subtree
    pub(crate) fn subtree_len(&self) -> usize {
        self.keys.len() + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Append this subtree's keys in order
    pub(crate) fn collect_keys(&self, out: &mut Vec<Key>) {
        if self.is_leaf() {
            out.extend_from_slice(&self.keys);
            return;
        }
        for (i, child) in self.children.iter().enumerate() {
            child.collect_keys(out);
            if let Some(&key) = self.keys.get(i) {
                out.push(key);
            }
        }
    }
}
