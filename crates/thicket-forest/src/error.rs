//! Forest error types.

use std::error::Error;
use std::fmt;

use thicket_core::ArenaError;

use crate::node::NodeId;

/// Errors from checked forest operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForestError {
    /// The target node is not live in this forest.
    NotFound {
        /// The missing node.
        node: NodeId,
    },
    /// `add_child` was asked to attach a node that already has a parent.
    AlreadyAttached {
        /// The node being attached.
        node: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
    /// One of the backing arenas could not grow.
    Arena(ArenaError),
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { node } => write!(f, "node {node} not found"),
            Self::AlreadyAttached { node, parent } => {
                write!(f, "node {node} is already attached to {parent}")
            }
            Self::Arena(e) => write!(f, "arena error: {e}"),
        }
    }
}

impl Error for ForestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ForestError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
