//! Depth-first traversal, flattening, and subtree removal.

use thicket_arena::Backing;

use crate::error::ForestError;
use crate::forest::Forest;
use crate::node::NodeId;

impl<T, B: Backing> Forest<T, B> {
    /// Visit the subtree rooted at `at` depth-first, pre-order.
    ///
    /// `visit` sees each node before its descendants, siblings in child-list
    /// order, and gets mutable access to the forest. A node's children are
    /// read when the node is reached, after `visit` ran for it: children
    /// attached by `visit` are visited, nodes erased by `visit` are skipped.
    /// Beyond that, restructuring the subtree being walked gives no ordering
    /// guarantee for the rest of the walk.
    ///
    /// Uses an explicit stack, so deep trees do not overflow the call stack.
    pub fn traverse<F>(&mut self, at: NodeId, mut visit: F) -> Result<(), ForestError>
    where
        F: FnMut(NodeId, &mut Self),
    {
        self.ensure_live(at)?;
        let mut stack = vec![at];
        while let Some(node) = stack.pop() {
            if !self.contains(node) {
                continue;
            }
            visit(node, self);
            if let Some(entry) = self.nodes.get(node) {
                stack.extend(self.children_of(entry).iter().rev().copied());
            }
        }
        Ok(())
    }

    /// Flatten the subtree rooted at `at` into pre-order: every parent
    /// before its descendants, siblings in child-list order.
    pub fn sort(&self, at: NodeId) -> Result<Vec<NodeId>, ForestError> {
        self.ensure_live(at)?;
        let mut order = Vec::new();
        let mut stack = vec![at];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children_of(&self.nodes[node]).iter().rev().copied());
        }
        Ok(order)
    }

    /// Remove `at` and all its descendants. Returns how many nodes were
    /// removed.
    ///
    /// `at` is unlinked from its former parent. Cost is proportional to the
    /// subtree size; avoid on hot paths.
    pub fn cut(&mut self, at: NodeId) -> Result<usize, ForestError> {
        let order = self.sort(at)?;
        self.reset_parent(at)?;
        // The whole subtree goes, so links inside it need no fixing up.
        for &node in &order {
            let entry = self.nodes.erase_unchecked(node);
            if let Some(list) = entry.children {
                self.lists.erase_unchecked(list);
            }
        }
        tracing::debug!(
            target: "thicket::forest",
            root = at.raw(),
            removed = order.len(),
            remaining = self.size(),
            "subtree cut"
        );
        Ok(order.len())
    }

    /// Number of ancestors of `node` (0 for a detached node).
    pub fn depth(&self, node: NodeId) -> Result<usize, ForestError> {
        let mut depth = 0;
        let mut cursor = self.node(node)?.parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.nodes[parent].parent;
        }
        Ok(depth)
    }

    /// Every live node without a parent, ascending: the roots of the
    /// forest's trees.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(id, _)| id)
    }
}
