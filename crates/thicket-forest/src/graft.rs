//! Copying and moving subtrees between forests.
//!
//! Both directions walk the source subtree in pre-order, so a node's parent
//! is always remapped before the node itself. Destination capacity is
//! reserved up front: once the first destination node is created no
//! allocation can fail, and an error leaves both forests' contents as they
//! were.

use indexmap::IndexMap;
use thicket_arena::Backing;

use crate::error::ForestError;
use crate::forest::Forest;
use crate::node::{NodeId, TreeNode};

impl<T, B: Backing> Forest<T, B> {
    /// Copy the subtree rooted at `from` in `other` under `to`.
    ///
    /// Returns the destination index of the copied root. The source is left
    /// untouched.
    pub fn insert<B2: Backing>(
        &mut self,
        to: NodeId,
        other: &Forest<T, B2>,
        from: NodeId,
    ) -> Result<NodeId, ForestError>
    where
        T: Clone,
    {
        let map = self.insert_mapped(to, other, from)?;
        Ok(map[&from])
    }

    /// Like [`insert`](Self::insert), returning the full old→new index map
    /// in pre-order. The first entry maps `from` to the copied root.
    pub fn insert_mapped<B2: Backing>(
        &mut self,
        to: NodeId,
        other: &Forest<T, B2>,
        from: NodeId,
    ) -> Result<IndexMap<NodeId, NodeId>, ForestError>
    where
        T: Clone,
    {
        self.ensure_live(to)?;
        let order = other.sort(from)?;
        self.reserve_graft(to, other, &order)?;

        let mut map = IndexMap::with_capacity(order.len());
        for &old in &order {
            let entry = &other.nodes[old];
            let new = self.nodes.emplace(TreeNode::detached(entry.value.clone()))?;
            map.insert(old, new);
            if old != from {
                if let Some(parent) = entry.parent {
                    self.link(map[&parent], new)?;
                }
            }
        }
        self.link(to, map[&from])?;

        tracing::debug!(
            target: "thicket::forest",
            from = from.raw(),
            to = to.raw(),
            nodes = map.len(),
            "subtree inserted"
        );
        Ok(map)
    }

    /// Move the subtree rooted at `from` out of `other` and under `to`.
    ///
    /// Payloads are moved, not cloned. Afterwards none of the subtree's
    /// former indices are live in `other`, and `from` is gone from its
    /// former parent's child list there. Returns the destination index of
    /// the moved root.
    pub fn take<B2: Backing>(
        &mut self,
        to: NodeId,
        other: &mut Forest<T, B2>,
        from: NodeId,
    ) -> Result<NodeId, ForestError> {
        let map = self.take_mapped(to, other, from)?;
        Ok(map[&from])
    }

    /// Like [`take`](Self::take), returning the full old→new index map in
    /// pre-order. The old indices are dead in `other` by the time this
    /// returns.
    pub fn take_mapped<B2: Backing>(
        &mut self,
        to: NodeId,
        other: &mut Forest<T, B2>,
        from: NodeId,
    ) -> Result<IndexMap<NodeId, NodeId>, ForestError> {
        self.ensure_live(to)?;
        let order = other.sort(from)?;
        self.reserve_graft(to, other, &order)?;
        other.reset_parent(from)?;

        let mut map = IndexMap::with_capacity(order.len());
        for &old in &order {
            let entry = other.nodes.erase_unchecked(old);
            if let Some(list) = entry.children {
                other.lists.erase_unchecked(list);
            }
            let new = self.nodes.emplace(TreeNode::detached(entry.value))?;
            map.insert(old, new);
            // `from` was detached above, so only inner nodes have a parent.
            if let Some(parent) = entry.parent {
                self.link(map[&parent], new)?;
            }
        }
        self.link(to, map[&from])?;

        tracing::debug!(
            target: "thicket::forest",
            from = from.raw(),
            to = to.raw(),
            nodes = map.len(),
            "subtree taken"
        );
        Ok(map)
    }

    /// Make room for one node per entry of `order` plus every child list the
    /// graft will allocate, including `to`'s if it has none yet.
    fn reserve_graft<B2: Backing>(
        &mut self,
        to: NodeId,
        other: &Forest<T, B2>,
        order: &[NodeId],
    ) -> Result<(), ForestError> {
        let inner = order
            .iter()
            .filter(|&&n| !other.children_of(&other.nodes[n]).is_empty())
            .count();
        let for_to = usize::from(self.nodes[to].children.is_none());
        self.nodes.reserve(order.len())?;
        self.lists.reserve(inner + for_to)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use thicket_arena::{ArenaConfig, Chunked, SlotArena};

    use super::*;

    /// root(0) ─┬─ a(1) ── g(3)
    ///          └─ b(2)
    fn scenario() -> Forest<String> {
        let mut f = Forest::new();
        let root = f.emplace("root".to_string()).unwrap();
        let a = f.emplace("childA".to_string()).unwrap();
        f.add_child(root, a).unwrap();
        let b = f.emplace("childB".to_string()).unwrap();
        f.add_child(root, b).unwrap();
        let g = f.emplace("grandchild".to_string()).unwrap();
        f.add_child(a, g).unwrap();
        f
    }

    fn target() -> (Forest<String>, NodeId) {
        let mut f = Forest::new();
        let anchor = f.emplace("anchor".to_string()).unwrap();
        (f, anchor)
    }

    fn assert_isomorphic<B1: Backing, B2: Backing>(
        src: &Forest<String, B1>,
        dst: &Forest<String, B2>,
        map: &IndexMap<NodeId, NodeId>,
    ) {
        for (&old, &new) in map.iter().skip(1) {
            let old_parent = src.get_parent(old).unwrap().unwrap();
            assert_eq!(dst.get_parent(new).unwrap(), Some(map[&old_parent]));
            let old_kids: Vec<_> = src.get_children(old).unwrap().iter().map(|c| map[c]).collect();
            assert_eq!(dst.get_children(new).unwrap(), old_kids.as_slice());
        }
    }

    #[test]
    fn insert_copies_shape_and_payloads() {
        let src = scenario();
        let (mut dst, anchor) = target();
        let map = dst.insert_mapped(anchor, &src, NodeId::ZERO).unwrap();

        assert_eq!(map.len(), 4);
        let (&first_old, &copied_root) = map.first().unwrap();
        assert_eq!(first_old, NodeId::ZERO);
        assert_eq!(dst.get_parent(copied_root).unwrap(), Some(anchor));
        assert_eq!(dst.get_children(anchor).unwrap(), &[copied_root]);
        for (&old, &new) in &map {
            assert_eq!(dst[new], src[old]);
        }
        assert_isomorphic(&src, &dst, &map);
        assert_eq!(dst.size(), 5);
        // Source untouched.
        assert_eq!(src.size(), 4);
        assert_eq!(src.sort(NodeId::ZERO).unwrap().len(), 4);
    }

    #[test]
    fn insert_map_is_preorder() {
        let src = scenario();
        let (mut dst, anchor) = target();
        let map = dst.insert_mapped(anchor, &src, NodeId::ZERO).unwrap();
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, src.sort(NodeId::ZERO).unwrap());
    }

    #[test]
    fn insert_inner_subtree() {
        let src = scenario();
        let (mut dst, anchor) = target();
        let copied = dst.insert(anchor, &src, NodeId::new(1)).unwrap();
        assert_eq!(dst[copied], "childA");
        let kids = dst.get_children(copied).unwrap();
        assert_eq!(kids.len(), 1);
        assert_eq!(dst[kids[0]], "grandchild");
    }

    #[test]
    fn insert_into_self_copy() {
        let mut f = scenario();
        let snapshot = f.clone();
        let copied = f.insert(NodeId::new(2), &snapshot, NodeId::new(1)).unwrap();
        assert_eq!(f.get_parent(copied).unwrap(), Some(NodeId::new(2)));
        assert_eq!(f.size(), 6);
    }

    #[test]
    fn take_moves_and_removes_source() {
        let mut src = scenario();
        let (mut dst, anchor) = target();
        let map = dst.take_mapped(anchor, &mut src, NodeId::new(1)).unwrap();

        assert_eq!(map.len(), 2);
        for &old in map.keys() {
            assert!(!src.contains(old));
        }
        assert_eq!(src.size(), 2);
        assert_eq!(src.get_children(NodeId::ZERO).unwrap(), &[NodeId::new(2)]);
        // The moved root's list and the grandchild's (none) are gone.
        assert_eq!(src.child_list_count(), 1);

        let moved = map[&NodeId::new(1)];
        assert_eq!(dst[moved], "childA");
        assert_eq!(dst[map[&NodeId::new(3)]], "grandchild");
        assert_eq!(dst.get_parent(map[&NodeId::new(3)]).unwrap(), Some(moved));
        assert_eq!(dst.get_children(anchor).unwrap(), &[moved]);
    }

    #[test]
    fn take_whole_tree_empties_source() {
        let mut src = scenario();
        let (mut dst, anchor) = target();
        dst.take(anchor, &mut src, NodeId::ZERO).unwrap();
        assert!(src.is_empty());
        assert_eq!(src.child_list_count(), 0);
        assert_eq!(dst.size(), 5);
        assert_eq!(dst.sort(anchor).unwrap().len(), 5);
    }

    #[test]
    fn missing_endpoints_change_nothing() {
        let mut src = scenario();
        let (mut dst, anchor) = target();
        let dead = NodeId::new(9);

        assert_eq!(
            dst.take(dead, &mut src, NodeId::ZERO),
            Err(ForestError::NotFound { node: dead })
        );
        assert_eq!(
            dst.insert(anchor, &src, dead),
            Err(ForestError::NotFound { node: dead })
        );
        assert_eq!(src.size(), 4);
        assert_eq!(dst.size(), 1);
    }

    #[test]
    fn capacity_failure_leaves_both_forests_intact() {
        let mut src = scenario();
        let config = ArenaConfig::new(0).with_max_slots(3);
        let mut dst: Forest<String> = Forest::with_config(config).unwrap();
        let anchor = dst.emplace("anchor".to_string()).unwrap();

        let err = dst.take(anchor, &mut src, NodeId::ZERO).unwrap_err();
        assert!(matches!(err, ForestError::Arena(_)));
        assert_eq!(src.size(), 4);
        assert_eq!(src.sort(NodeId::ZERO).unwrap().len(), 4);
        assert_eq!(dst.size(), 1);
        assert!(!dst.has_children(anchor).unwrap());
    }

    #[test]
    fn insert_capacity_failure_leaves_both_forests_intact() {
        let src = scenario();
        let config = ArenaConfig::new(0).with_max_slots(3);
        let mut dst: Forest<String> = Forest::with_config(config).unwrap();
        let anchor = dst.emplace("anchor".to_string()).unwrap();

        let err = dst.insert_mapped(anchor, &src, NodeId::ZERO).unwrap_err();
        assert!(matches!(
            err,
            ForestError::Arena(thicket_core::ArenaError::CapacityExceeded { .. })
        ));
        assert_eq!(dst.size(), 1);
        assert!(!dst.has_children(anchor).unwrap());
        assert_eq!(dst.child_list_count(), 0);
        dst.debug_validate_invariants();
        assert_eq!(src.size(), 4);
        src.debug_validate_invariants();
    }

    /// Node slots to spare, child lists capped at `lists_max`.
    fn list_limited(lists_max: u32) -> (Forest<String>, NodeId) {
        let mut f = Forest {
            nodes: SlotArena::with_config(ArenaConfig::new(0).with_max_slots(16)).unwrap(),
            lists: SlotArena::with_config(ArenaConfig::new(0).with_max_slots(lists_max)).unwrap(),
        };
        let anchor = f.emplace("anchor".to_string()).unwrap();
        (f, anchor)
    }

    #[test]
    fn child_list_limit_fails_before_mutation() {
        // The scenario needs lists for root and childA, plus one for the
        // anchor, which has none yet.
        let mut src = scenario();
        let (mut dst, anchor) = list_limited(2);

        assert!(matches!(
            dst.insert(anchor, &src, NodeId::ZERO),
            Err(ForestError::Arena(_))
        ));
        assert!(matches!(
            dst.take(anchor, &mut src, NodeId::ZERO),
            Err(ForestError::Arena(_))
        ));
        assert_eq!(dst.size(), 1);
        assert_eq!(dst.child_list_count(), 0);
        dst.debug_validate_invariants();
        assert_eq!(src.size(), 4);
        src.debug_validate_invariants();
    }

    #[test]
    fn child_list_reservation_is_exact() {
        let src = scenario();
        let (mut dst, anchor) = list_limited(3);
        let copied = dst.insert(anchor, &src, NodeId::ZERO).unwrap();
        assert_eq!(dst.child_list_count(), 3);
        assert_eq!(dst.sort(copied).unwrap().len(), 4);
        dst.debug_validate_invariants();

        // Anchor's list now exists; a leaf copy needs no new list.
        let leaf = dst.insert(anchor, &src, NodeId::new(2)).unwrap();
        assert_eq!(dst[leaf], "childB");
        assert_eq!(dst.child_list_count(), 3);
    }

    #[test]
    fn graft_across_backings() {
        let mut src = scenario();
        let mut dst: Forest<String, Chunked> = Forest::with_config(ArenaConfig::default()).unwrap();
        let anchor = dst.emplace("anchor".to_string()).unwrap();

        let copy = dst.insert_mapped(anchor, &src, NodeId::ZERO).unwrap();
        assert_isomorphic(&src, &dst, &copy);

        let moved = dst.take(anchor, &mut src, NodeId::new(1)).unwrap();
        assert_eq!(dst.get_children(anchor).unwrap().len(), 2);
        assert_eq!(dst[moved], "childA");
        assert_eq!(src.size(), 2);
    }
}
