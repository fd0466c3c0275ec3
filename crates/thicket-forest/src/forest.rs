//! The forest: node storage and edge bookkeeping.
//!
//! Traversal and bulk removal live in `walk.rs`; cross-forest subtree
//! copy/move in `graft.rs`. Both extend [`Forest`] with further inherent
//! methods.

use std::fmt;
use std::ops::{Index, IndexMut};

use thicket_arena::{ArenaConfig, Backing, ConfigError, Contiguous, SlotArena};

use crate::error::ForestError;
use crate::node::{ChildList, ChildListClass, NodeClass, NodeId, TreeNode};

/// A collection of disjoint trees sharing one index space.
///
/// By convention index 0, once created, is the root of the first tree
/// (see [`root`](Self::root)); nothing else treats it specially.
///
/// Not synchronised.
pub struct Forest<T, B: Backing = Contiguous> {
    pub(crate) nodes: SlotArena<TreeNode<T>, NodeClass, B>,
    pub(crate) lists: SlotArena<ChildList, ChildListClass, B>,
}

impl<T> Forest<T, Contiguous> {
    /// Create an empty forest with contiguous backing.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            lists: SlotArena::new(),
        }
    }
}

impl<T> Default for Forest<T, Contiguous> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B: Backing> Forest<T, B> {
    /// Create a forest whose node and child-list arenas both use `config`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            nodes: SlotArena::with_config(config.clone())?,
            lists: SlotArena::with_config(config)?,
        })
    }

    // ── Node lifecycle ──────────────────────────────────────────────

    /// Create a detached node holding `value`.
    pub fn emplace(&mut self, value: T) -> Result<NodeId, ForestError> {
        Ok(self.nodes.emplace(TreeNode::detached(value))?)
    }

    /// Remove a single node and return its payload.
    ///
    /// The node is unlinked from its parent. Its children are not removed:
    /// they become detached roots. Use [`cut`](Self::cut) to remove a
    /// whole subtree.
    pub fn erase(&mut self, node: NodeId) -> Result<T, ForestError> {
        self.ensure_live(node)?;
        self.reset_parent(node)?;
        let entry = self.nodes.erase_unchecked(node);
        if let Some(list) = entry.children {
            for child in self.lists.erase_unchecked(list) {
                if let Some(c) = self.nodes.get_mut(child) {
                    c.parent = None;
                }
            }
        }
        Ok(entry.value)
    }

    /// Drop every node. Capacity of both arenas is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lists.clear();
    }

    // ── Edges ───────────────────────────────────────────────────────

    /// Append `child` to `at`'s child list.
    ///
    /// `child` must be detached; attaching a node that already has a parent
    /// fails with [`ForestError::AlreadyAttached`]. The caller must also
    /// make sure `child` is not an ancestor of `at` (or `at` itself): cycles
    /// are not detected.
    pub fn add_child(&mut self, at: NodeId, child: NodeId) -> Result<(), ForestError> {
        self.ensure_live(at)?;
        if let Some(parent) = self.node(child)?.parent {
            return Err(ForestError::AlreadyAttached {
                node: child,
                parent,
            });
        }
        self.link(at, child)
    }

    /// Attach without validation. Both nodes must be live and `child`
    /// detached.
    pub(crate) fn link(&mut self, at: NodeId, child: NodeId) -> Result<(), ForestError> {
        let list = match self.nodes[at].children {
            Some(list) => list,
            None => {
                let list = self.lists.emplace(ChildList::new())?;
                self.nodes[at].children = Some(list);
                list
            }
        };
        self.lists[list].push(child);
        self.nodes[child].parent = Some(at);
        Ok(())
    }

    /// Detach `node` from its parent. No-op if already detached.
    ///
    /// The parent's child list keeps the order of the remaining children.
    pub fn reset_parent(&mut self, node: NodeId) -> Result<(), ForestError> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        if let Some(list) = self.nodes[parent].children {
            let children = &mut self.lists[list];
            if let Some(pos) = children.iter().position(|&c| c == node) {
                children.remove(pos);
            }
        }
        self.nodes[node].parent = None;
        Ok(())
    }

    /// Position of `child` in `at`'s child list, if present. Linear scan.
    pub fn find_child(&self, at: NodeId, child: NodeId) -> Result<Option<usize>, ForestError> {
        Ok(self.get_children(at)?.iter().position(|&c| c == child))
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Whether `node` is live.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// Whether `node` has a parent.
    pub fn has_parent(&self, node: NodeId) -> Result<bool, ForestError> {
        Ok(self.node(node)?.parent.is_some())
    }

    /// The parent of `node`, if attached.
    pub fn get_parent(&self, node: NodeId) -> Result<Option<NodeId>, ForestError> {
        Ok(self.node(node)?.parent)
    }

    /// Whether `node` has at least one child.
    pub fn has_children(&self, node: NodeId) -> Result<bool, ForestError> {
        Ok(!self.get_children(node)?.is_empty())
    }

    /// The children of `node` in attachment order.
    pub fn get_children(&self, node: NodeId) -> Result<&[NodeId], ForestError> {
        Ok(self.children_of(self.node(node)?))
    }

    /// The payload of `node`.
    pub fn get(&self, node: NodeId) -> Result<&T, ForestError> {
        Ok(&self.node(node)?.value)
    }

    /// The payload of `node`, mutably.
    pub fn get_mut(&mut self, node: NodeId) -> Result<&mut T, ForestError> {
        self.nodes
            .get_mut(node)
            .map(|n| &mut n.value)
            .ok_or(ForestError::NotFound { node })
    }

    /// The full node record (payload and links).
    pub fn node(&self, node: NodeId) -> Result<&TreeNode<T>, ForestError> {
        self.nodes.get(node).ok_or(ForestError::NotFound { node })
    }

    /// Index 0 if it is live: the canonical root of the first tree.
    pub fn root(&self) -> Option<NodeId> {
        self.contains(NodeId::ZERO).then_some(NodeId::ZERO)
    }

    /// Live `(node, payload)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.nodes.iter().map(|(id, n)| (id, &n.value))
    }

    pub(crate) fn children_of(&self, entry: &TreeNode<T>) -> &[NodeId] {
        match entry.children {
            Some(list) => self.lists[list].as_slice(),
            None => &[],
        }
    }

    pub(crate) fn ensure_live(&self, node: NodeId) -> Result<(), ForestError> {
        if self.nodes.contains(node) {
            Ok(())
        } else {
            Err(ForestError::NotFound { node })
        }
    }

    // ── Sizing ──────────────────────────────────────────────────────

    /// Number of live nodes.
    pub fn size(&self) -> usize {
        self.nodes.size()
    }

    /// Alias for [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.nodes.size()
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total node slots.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Grow both arenas to at least `capacity` slots.
    pub fn expand_to(&mut self, capacity: usize) -> Result<(), ForestError> {
        self.nodes.expand_to(capacity)?;
        self.lists.expand_to(capacity)?;
        Ok(())
    }

    /// Make room for `additional` more nodes, each with its own child list,
    /// without further growth.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ForestError> {
        self.nodes.reserve(additional)?;
        self.lists.reserve(additional)?;
        Ok(())
    }

    /// Number of live child lists. Diagnostic.
    pub fn child_list_count(&self) -> usize {
        self.lists.size()
    }

    /// Check both arenas' free chains and every parent/child link.
    ///
    /// O(nodes + edges). Intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics if a link points at a dead node or slot, a child list entry
    /// does not point back at its owner, a child appears twice, or a child
    /// list is owned by no node or by more than one.
    pub fn debug_validate_invariants(&self) {
        self.nodes.debug_validate_invariants();
        self.lists.debug_validate_invariants();

        let mut owned_lists = 0usize;
        for (id, entry) in self.nodes.iter() {
            if let Some(parent) = entry.parent {
                let siblings = match self.nodes.get(parent) {
                    Some(p) => self.children_of(p),
                    None => panic!("node {id} has dead parent {parent}"),
                };
                let hits = siblings.iter().filter(|&&c| c == id).count();
                assert_eq!(hits, 1, "node {id} listed {hits} times under {parent}");
            }
            if let Some(list) = entry.children {
                assert!(self.lists.contains(list), "node {id} owns dead list {list}");
                owned_lists += 1;
                for &child in self.lists[list].iter() {
                    let back = self.nodes.get(child).and_then(|c| c.parent);
                    assert_eq!(back, Some(id), "child {child} of {id} does not point back");
                }
            }
        }
        assert_eq!(owned_lists, self.lists.size(), "orphaned child lists");
    }
}

impl<T, B: Backing> Index<NodeId> for Forest<T, B> {
    type Output = T;

    /// Unchecked payload access.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not live.
    fn index(&self, node: NodeId) -> &T {
        &self.nodes[node].value
    }
}

impl<T, B: Backing> IndexMut<NodeId> for Forest<T, B> {
    fn index_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.nodes[node].value
    }
}

impl<T, B> Clone for Forest<T, B>
where
    B: Backing,
    SlotArena<TreeNode<T>, NodeClass, B>: Clone,
    SlotArena<ChildList, ChildListClass, B>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            lists: self.lists.clone(),
        }
    }
}

impl<T: fmt::Debug, B: Backing> fmt::Debug for Forest<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, entry) in self.nodes.iter() {
            map.entry(
                &id.raw(),
                &(&entry.value, entry.parent.map(|p| p.raw()), self.children_of(entry)),
            );
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Forest<&'static str>, NodeId, NodeId) {
        let mut f = Forest::new();
        let a = f.emplace("a").unwrap();
        let b = f.emplace("b").unwrap();
        (f, a, b)
    }

    #[test]
    fn emplace_creates_detached_node() {
        let (f, a, _) = pair();
        assert_eq!(f.get(a).unwrap(), &"a");
        assert!(!f.has_parent(a).unwrap());
        assert!(!f.has_children(a).unwrap());
        assert_eq!(f.node(a).unwrap().children_handle(), None);
        assert_eq!(f.root(), Some(NodeId::ZERO));
    }

    #[test]
    fn add_child_links_both_ways() {
        let (mut f, a, b) = pair();
        f.add_child(a, b).unwrap();
        assert_eq!(f.get_parent(b).unwrap(), Some(a));
        assert_eq!(f.get_children(a).unwrap(), &[b]);
        assert_eq!(f.find_child(a, b).unwrap(), Some(0));
        assert!(f.has_children(a).unwrap());
    }

    #[test]
    fn add_child_rejects_attached_node() {
        let (mut f, a, b) = pair();
        let c = f.emplace("c").unwrap();
        f.add_child(a, b).unwrap();
        assert_eq!(
            f.add_child(c, b),
            Err(ForestError::AlreadyAttached { node: b, parent: a })
        );
        assert_eq!(f.get_children(c).unwrap(), &[] as &[NodeId]);
    }

    #[test]
    fn add_child_rejects_dead_nodes() {
        let (mut f, a, b) = pair();
        f.erase(b).unwrap();
        assert_eq!(f.add_child(a, b), Err(ForestError::NotFound { node: b }));
        assert_eq!(f.add_child(b, a), Err(ForestError::NotFound { node: b }));
    }

    #[test]
    fn reset_parent_keeps_list_allocated() {
        let (mut f, a, b) = pair();
        f.add_child(a, b).unwrap();
        f.reset_parent(b).unwrap();
        assert_eq!(f.get_parent(b).unwrap(), None);
        assert!(!f.has_children(a).unwrap());
        assert!(f.node(a).unwrap().children_handle().is_some());
        // Detached already: no-op.
        f.reset_parent(b).unwrap();
    }

    #[test]
    fn reset_parent_preserves_sibling_order() {
        let mut f = Forest::new();
        let root = f.emplace(0).unwrap();
        let kids: Vec<_> = (1..=4).map(|v| f.emplace(v).unwrap()).collect();
        for &k in &kids {
            f.add_child(root, k).unwrap();
        }
        f.reset_parent(kids[1]).unwrap();
        assert_eq!(f.get_children(root).unwrap(), &[kids[0], kids[2], kids[3]]);
    }

    #[test]
    fn erase_orphans_children_and_unlinks_parent() {
        let mut f = Forest::new();
        let root = f.emplace("root").unwrap();
        let mid = f.emplace("mid").unwrap();
        let leaf1 = f.emplace("leaf1").unwrap();
        let leaf2 = f.emplace("leaf2").unwrap();
        f.add_child(root, mid).unwrap();
        f.add_child(mid, leaf1).unwrap();
        f.add_child(mid, leaf2).unwrap();

        assert_eq!(f.erase(mid).unwrap(), "mid");
        assert!(!f.contains(mid));
        assert_eq!(f.get_children(root).unwrap(), &[] as &[NodeId]);
        assert_eq!(f.get_parent(leaf1).unwrap(), None);
        assert_eq!(f.get_parent(leaf2).unwrap(), None);
        assert_eq!(f.size(), 3);
        // mid's child list went back to the list arena; root's stays.
        assert_eq!(f.child_list_count(), 1);
    }

    #[test]
    fn erase_missing_is_not_found() {
        let (mut f, a, _) = pair();
        f.erase(a).unwrap();
        assert_eq!(f.erase(a), Err(ForestError::NotFound { node: a }));
        assert!(matches!(
            f.get(a),
            Err(ForestError::NotFound { .. })
        ));
    }

    #[test]
    fn reads_on_dead_node_fail() {
        let (mut f, a, _) = pair();
        f.erase(a).unwrap();
        assert!(f.has_parent(a).is_err());
        assert!(f.get_parent(a).is_err());
        assert!(f.has_children(a).is_err());
        assert!(f.get_children(a).is_err());
        assert!(f.find_child(a, a).is_err());
        assert!(f.get_mut(a).is_err());
        assert_eq!(f.root(), None);
    }

    #[test]
    fn index_gives_payload() {
        let (mut f, a, _) = pair();
        f[a] = "z";
        assert_eq!(f[a], "z");
        *f.get_mut(a).unwrap() = "y";
        assert_eq!(f[a], "y");
    }

    #[test]
    fn clear_empties_both_arenas() {
        let (mut f, a, b) = pair();
        f.add_child(a, b).unwrap();
        let cap = f.capacity();
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.child_list_count(), 0);
        assert_eq!(f.capacity(), cap);
        assert_eq!(f.emplace("again").unwrap(), NodeId::ZERO);
    }

    #[test]
    fn expand_to_grows_both_arenas() {
        let mut f: Forest<u8> = Forest::new();
        f.expand_to(32).unwrap();
        assert!(f.capacity() >= 32);
        assert!(f.lists.capacity() >= 32);
    }

    #[test]
    fn capacity_limit_surfaces_as_arena_error() {
        let config = ArenaConfig::new(0).with_max_slots(2);
        let mut f: Forest<u8> = Forest::with_config(config).unwrap();
        f.emplace(0).unwrap();
        f.emplace(1).unwrap();
        assert!(matches!(
            f.emplace(2),
            Err(ForestError::Arena(thicket_core::ArenaError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn iter_lists_payloads() {
        let (f, a, b) = pair();
        let seen: Vec<_> = f.iter().collect();
        assert_eq!(seen, vec![(a, &"a"), (b, &"b")]);
    }

    #[test]
    fn debug_shows_links() {
        let (mut f, a, b) = pair();
        f.add_child(a, b).unwrap();
        let text = format!("{f:?}");
        assert!(text.contains("\"a\""));
        assert!(text.contains("Some(0)"));
    }
}
