//! Core types for the Thicket arena workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! primitives every other Thicket crate builds on: the typed index token
//! [`Idx`], the arena error taxonomy, a swap-and-pop erase helper for plain
//! sequences, and a minimal spin lock for callers that need to share an
//! arena across threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod id;
pub mod seq;
pub mod sync;

pub use error::ArenaError;
pub use id::{Idx, MAX_SLOTS, NULL_RAW};
pub use seq::{swap_erase, SwapErase};
pub use sync::{SpinLock, SpinLockGuard};
