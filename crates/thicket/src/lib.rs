//! Thicket: free-list slot arenas and index-linked multi-root forests.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Thicket sub-crates. For most users, adding `thicket` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use thicket::prelude::*;
//!
//! // A scene graph: one root with two children, one grandchild.
//! let mut scene: Forest<&str> = Forest::new();
//! let root = scene.emplace("root").unwrap();
//! let arm = scene.emplace("arm").unwrap();
//! let leg = scene.emplace("leg").unwrap();
//! let hand = scene.emplace("hand").unwrap();
//! scene.add_child(root, arm).unwrap();
//! scene.add_child(root, leg).unwrap();
//! scene.add_child(arm, hand).unwrap();
//! assert_eq!(scene.sort(root).unwrap(), vec![root, arm, hand, leg]);
//!
//! // Move the arm (and its hand) into a second scene.
//! let mut other: Forest<&str> = Forest::new();
//! let anchor = other.emplace("anchor").unwrap();
//! let moved = other.take(anchor, &mut scene, arm).unwrap();
//! assert_eq!(other[moved], "arm");
//! assert!(!scene.contains(hand));
//!
//! // A plain arena with index reuse.
//! let mut arena: SlotArena<u32> = SlotArena::new();
//! let a = arena.emplace(1).unwrap();
//! arena.erase(a);
//! assert_eq!(arena.emplace(2).unwrap(), a);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `thicket-core` | `Idx`, `ArenaError`, `swap_erase`, `SpinLock` |
//! | [`arena`] | `thicket-arena` | `SlotArena`, `ArenaConfig`, slot stores and backings |
//! | [`forest`] | `thicket-forest` | `Forest`, `TreeNode`, `ForestError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`thicket-core`).
///
/// The typed index [`types::Idx`], the [`types::ArenaError`] taxonomy, and
/// the small sequence and locking helpers.
pub use thicket_core as types;

/// Slot arenas (`thicket-arena`).
///
/// [`arena::SlotArena`] with its [`arena::ArenaConfig`], and the
/// [`arena::Contiguous`] and [`arena::Chunked`] backings.
pub use thicket_arena as arena;

/// Multi-root forests (`thicket-forest`).
pub use thicket_forest as forest;

/// Common imports for typical Thicket usage.
///
/// ```rust
/// use thicket::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use thicket_core::{ArenaError, Idx, SpinLock};

    // Arena
    pub use thicket_arena::{ArenaConfig, Chunked, ConfigError, Contiguous, SlotArena};

    // Forest
    pub use thicket_forest::{Forest, ForestError, NodeId};
}
