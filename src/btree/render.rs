//! Human-readable views of the tree: the indented printout, the serializable
//! snapshot and the search trace.

use std::fmt;

use super::node::Node;
use super::tree::BTree;
use crate::types::Key;
use crate::TreeNode;

impl BTree {
    /// Render the tree one node per line, pre-order.
    ///
    /// Each line reads `{indent}+- {R|L}: {keys}`. The marker follows the
    /// last-sibling flag, which is also set for the root, so the root and every
    /// last child print `R` and all other children print `L`.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        render_node(&self.root, String::new(), true, &mut lines);
        lines
    }

    /// Export the tree structure for serialization
    pub fn export(&self) -> TreeNode {
        export_node(&self.root)
    }

    /// Trace the path a search for `key` takes through the tree
    pub fn debug_search(&self, key: Key) -> Vec<String> {
        let mut trace = Vec::new();
        trace.push(format!("Searching for key: {}", key));
        trace.push(format!("Height: {}, min degree: {}", self.height(), self.min_degree()));

        let mut node = &self.root;
        let mut depth = 0;
        loop {
            trace.push(format!(
                "  Depth {}: is_leaf={}, keys=[{}]",
                depth,
                node.is_leaf(),
                join_keys(node.keys())
            ));

            let i = node.first_index_not_less(key);
            if node.keys.get(i) == Some(&key) {
                trace.push(format!("  FOUND at index {}", i));
                return trace;
            }
            if node.is_leaf() {
                trace.push("  NOT FOUND in leaf".to_string());
                return trace;
            }

            trace.push(format!("  -> Descending to child {}", i));
            node = &node.children[i];
            depth += 1;
        }
    }
}

impl fmt::Display for BTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.render().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn render_node(node: &Node, indent: String, last: bool, lines: &mut Vec<String>) {
    let marker = if last { "R" } else { "L" };
    lines.push(format!("{}+- {}: {}", indent, marker, join_keys(node.keys())));

    let indent = indent + if last { "   " } else { "|  " };
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, indent.clone(), i + 1 == count, lines);
    }
}

fn export_node(node: &Node) -> TreeNode {
    TreeNode {
        is_leaf: node.is_leaf(),
        keys: node.keys.clone(),
        children: node.children.iter().map(export_node).collect(),
    }
}

fn join_keys(keys: &[Key]) -> String {
    keys.iter()
        .map(Key::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
