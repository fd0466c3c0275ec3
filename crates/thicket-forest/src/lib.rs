//! Index-linked multi-root trees built on Thicket slot arenas.
//!
//! A [`Forest`] stores any number of disjoint trees in one index space.
//! Parent/child relationships are expressed entirely through indices:
//!
//! ```text
//! Forest<T, B>
//! ├── SlotArena<TreeNode<T>, NodeClass, B>
//! │   └── TreeNode { value, parent: Option<NodeId>, children: Option<ChildListId> }
//! └── SlotArena<ChildList, ChildListClass, B>
//!     └── ChildList = SmallVec<[NodeId; 4]>  (allocated on first add_child)
//! ```
//!
//! Between any two public calls:
//!
//! - every node has at most one parent;
//! - if `n.parent == Some(p)`, `p`'s child list holds `n` exactly once, and
//!   every entry of every child list points back at its owner;
//! - a node has a child list iff a child was attached to it at some point.
//!
//! Acyclicity is the caller's responsibility: [`Forest::add_child`] does not
//! search for cycles, and a cycle makes [`Forest::traverse`] and
//! [`Forest::sort`] loop forever.
//!
//! Whole subtrees move between forests with [`Forest::insert`] (copy) and
//! [`Forest::take`] (move), which remap indices through an old→new table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod forest;
mod graft;
pub mod node;
mod walk;

// Public re-exports for the primary API surface.
pub use error::ForestError;
pub use forest::Forest;
pub use node::{ChildList, ChildListClass, ChildListId, NodeClass, NodeId, TreeNode};
pub use thicket_arena::{ArenaConfig, Backing, Chunked, ConfigError, Contiguous};
