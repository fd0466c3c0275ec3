//! Tree nodes and index classes.

use smallvec::SmallVec;
use thicket_core::Idx;

/// Index class for forest nodes.
#[derive(Debug)]
pub enum NodeClass {}

/// Index class for child lists.
#[derive(Debug)]
pub enum ChildListClass {}

/// Handle to a node in a [`Forest`](crate::Forest).
pub type NodeId = Idx<NodeClass>;

/// Handle to a child list in a forest's child-list arena.
pub type ChildListId = Idx<ChildListClass>;

/// Ordered child indices of one node.
///
/// Most nodes have few children; four fit inline without a heap allocation.
pub type ChildList = SmallVec<[NodeId; 4]>;

/// A node: payload plus its links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    /// Allocated lazily on the first `add_child`.
    pub(crate) children: Option<ChildListId>,
}

impl<T> TreeNode<T> {
    /// A detached node with no children.
    pub(crate) fn detached(value: T) -> Self {
        Self {
            value,
            parent: None,
            children: None,
        }
    }

    /// The payload.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handle of the child list, if one was ever allocated.
    pub fn children_handle(&self) -> Option<ChildListId> {
        self.children
    }
}
