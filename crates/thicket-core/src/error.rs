//! Arena error types.

use std::error::Error;
use std::fmt;

/// Errors from checked slot-arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The index is out of range or names a free slot.
    InvalidIndex {
        /// The offending raw index.
        index: u32,
        /// Arena capacity (total slots) at the time of the call.
        capacity: usize,
    },
    /// Growth would pass the configured slot limit or reach the null sentinel.
    CapacityExceeded {
        /// Total slots the operation needed.
        requested: usize,
        /// Maximum slots the arena may hold.
        limit: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, capacity } => {
                write!(
                    f,
                    "invalid index {index}: out of range or free (capacity {capacity})"
                )
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} slots, limit {limit}"
                )
            }
        }
    }
}

impl Error for ArenaError {}
