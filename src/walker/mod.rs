//! Pre-order traversal over a design document node tree
//!
//! Nodes are JSON objects whose children live in an ordered `children`
//! array. The walker yields borrowed references into the parsed document and
//! keeps its own stack of pending nodes, so arbitrarily deep trees never grow
//! the call stack.

use serde_json::Value;

/// Field holding a node's ordered child nodes
pub const CHILDREN_FIELD: &str = "children";

/// Start a pre-order walk at `root`. The root itself is yielded first.
pub fn walk(root: &Value) -> PreOrder<'_> {
    PreOrder {
        stack: vec![(root, 0)],
        depth: 0,
    }
}

/// Children of a node, or an empty slice when `children` is absent or not an array.
pub fn children_of(node: &Value) -> &[Value] {
    node.get(CHILDREN_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Number of nodes in the subtree rooted at `root`, root included.
pub fn count_nodes(root: &Value) -> usize {
    walk(root).count()
}

/// Iterator produced by [`walk`].
///
/// Not resumable across documents; call [`walk`] again to restart.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<(&'a Value, usize)>,
    depth: usize,
}

impl<'a> PreOrder<'a> {
    /// Depth of the node most recently returned by `next` (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.depth = depth;

        // Reverse push keeps the leftmost child on top
        for child in children_of(node).iter().rev() {
            self.stack.push((child, depth + 1));
        }

        Some(node)
    }
}
