//! Structural checks and statistics.

use super::node::Node;
use super::tree::BTree;
use crate::error::{Result, TreeError};
use crate::types::{DuplicatePolicy, Key, UnderflowPolicy};
use crate::TreeStats;

/// Key range a subtree must stay within
#[derive(Clone, Copy)]
struct Bounds {
    lower: Option<Key>,
    upper: Option<Key>,
}

impl BTree {
    /// Check the order, shape and fill invariants of the whole tree.
    ///
    /// The lower fill bound (`t - 1` keys per non-root node) is only enforced
    /// under [`UnderflowPolicy::Repair`]; tolerant deletion may leave nodes
    /// below it.
    pub fn validate(&self) -> Result<()> {
        if self.config.underflow == UnderflowPolicy::Repair
            && !self.root.is_leaf()
            && self.root.is_empty()
        {
            return Err(TreeError::invariant("internal root holds no keys"));
        }

        let mut leaf_depth = None;
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        self.validate_node(&self.root, bounds, 0, true, &mut leaf_depth)
    }

    fn validate_node(
        &self,
        node: &Node,
        bounds: Bounds,
        depth: usize,
        is_root: bool,
        leaf_depth: &mut Option<usize>,
    ) -> Result<()> {
        let strict = self.config.duplicates == DuplicatePolicy::Ignore;
        let max_keys = self.config.max_keys();
        let min_keys = self.config.min_keys();

        if node.len() > max_keys {
            return Err(TreeError::invariant(format!(
                "node at depth {} holds {} keys (max: {})",
                depth,
                node.len(),
                max_keys
            )));
        }
        if !is_root && self.config.underflow == UnderflowPolicy::Repair && node.len() < min_keys {
            return Err(TreeError::invariant(format!(
                "node at depth {} holds {} keys (min: {})",
                depth,
                node.len(),
                min_keys
            )));
        }

        for pair in node.keys.windows(2) {
            let ordered = if strict { pair[0] < pair[1] } else { pair[0] <= pair[1] };
            if !ordered {
                return Err(TreeError::invariant(format!(
                    "keys {} and {} out of order at depth {}",
                    pair[0], pair[1], depth
                )));
            }
        }

        for &key in &node.keys {
            let above = bounds
                .lower
                .map_or(true, |lower| if strict { key > lower } else { key >= lower });
            let below = bounds
                .upper
                .map_or(true, |upper| if strict { key < upper } else { key <= upper });
            if !above || !below {
                return Err(TreeError::invariant(format!(
                    "key {} at depth {} outside its separator range",
                    key, depth
                )));
            }
        }

        if node.is_leaf() {
            return match *leaf_depth {
                Some(expected) if expected != depth => Err(TreeError::invariant(format!(
                    "leaf at depth {} but other leaves at depth {}",
                    depth, expected
                ))),
                _ => {
                    *leaf_depth = Some(depth);
                    Ok(())
                }
            };
        }

        if node.children.len() != node.len() + 1 {
            return Err(TreeError::invariant(format!(
                "node at depth {} has {} keys but {} children",
                depth,
                node.len(),
                node.children.len()
            )));
        }

        for (i, child) in node.children.iter().enumerate() {
            let child_bounds = Bounds {
                lower: if i == 0 { bounds.lower } else { Some(node.keys[i - 1]) },
                upper: node.keys.get(i).copied().or(bounds.upper),
            };
            self.validate_node(child, child_bounds, depth + 1, false, leaf_depth)?;
        }
        Ok(())
    }

    /// Collect statistics about the tree's shape
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            height: self.height(),
            node_count: 0,
            leaf_count: 0,
            key_count: 0,
            min_degree: self.min_degree(),
        };
        count_nodes(&self.root, &mut stats);
        stats
    }
}

fn count_nodes(node: &Node, stats: &mut TreeStats) {
    stats.node_count += 1;
    stats.key_count += node.len();
    if node.is_leaf() {
        stats.leaf_count += 1;
    }
    for child in &node.children {
        count_nodes(child, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BTreeConfig;

    fn leaf(keys: &[Key]) -> Node {
        Node {
            keys: keys.to_vec(),
            children: Vec::new(),
        }
    }

    fn tree_from(root: Node, config: BTreeConfig) -> BTree {
        BTree { root, config }
    }

    #[test]
    fn test_validate_accepts_built_tree() {
        let mut tree = BTree::new(3).unwrap();
        for key in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(key);
        }
        tree.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_disorder() {
        let root = Node {
            keys: vec![10],
            children: vec![leaf(&[1, 2]), leaf(&[5, 11])],
        };
        let err = tree_from(root, BTreeConfig::new(3)).validate().unwrap_err();
        assert!(err.to_string().contains("key 5"));

        let tree = tree_from(leaf(&[3, 1]), BTreeConfig::new(3));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overfull_node() {
        let tree = tree_from(leaf(&[1, 2, 3, 4]), BTreeConfig::new(2));
        assert!(matches!(tree.validate(), Err(TreeError::InvariantViolation(_))));
    }

    #[test]
    fn test_validate_rejects_missing_child() {
        let root = Node {
            keys: vec![10, 20],
            children: vec![leaf(&[1]), leaf(&[15])],
        };
        assert!(tree_from(root, BTreeConfig::new(2)).validate().is_err());
    }

    #[test]
    fn test_validate_fill_depends_on_policy() {
        let underfull = || Node {
            keys: vec![10],
            children: vec![leaf(&[1]), leaf(&[11, 12])],
        };

        let tolerant = tree_from(underfull(), BTreeConfig::new(3));
        tolerant.validate().unwrap();

        let repairing = tree_from(
            underfull(),
            BTreeConfig::new(3).underflow(UnderflowPolicy::Repair),
        );
        assert!(repairing.validate().is_err());
    }

    #[test]
    fn test_validate_duplicates_depend_on_policy() {
        let tree = tree_from(leaf(&[4, 4]), BTreeConfig::new(3));
        tree.validate().unwrap();

        let strict = tree_from(
            leaf(&[4, 4]),
            BTreeConfig::new(3).duplicates(DuplicatePolicy::Ignore),
        );
        assert!(strict.validate().is_err());
    }

    #[test]
    fn test_stats() {
        let mut tree = BTree::new(2).unwrap();
        for key in 1..=10 {
            tree.insert(key);
        }
        let stats = tree.stats();
        assert_eq!(stats.height, 3);
        assert_eq!(stats.node_count, 8);
        assert_eq!(stats.leaf_count, 5);
        assert_eq!(stats.key_count, 10);
        assert_eq!(stats.min_degree, 2);
    }
}
