//! Free-list slot arena with stable typed indices.
//!
//! A [`SlotArena`] is a growable run of [`Slot`]s. Each slot is either free
//! (holding the index of the next free slot) or occupied (holding a live
//! value). Free slots form an intrusive singly-linked list, so both
//! `emplace` and `erase` are O(1) and erased indices are recycled LIFO.
//!
//! # Architecture
//!
//! ```text
//! SlotArena<T, C, B>
//! ├── B::Store<T> (pluggable backing, fixed at construction)
//! │   ├── VecStore     (Contiguous: one Vec, relocates on growth)
//! │   └── ChunkedStore (Chunked: fixed-size chunks, never relocates)
//! ├── free_head → Slot::Free { next } → ... → NULL
//! ├── free_tail (growth splices new slots here)
//! └── ArenaConfig (growth policy, slot limit)
//! ```
//!
//! # Checked and unchecked access
//!
//! Every method that takes an index validates it and reports misuse as
//! `None`, `false`, or [`ArenaError::InvalidIndex`]. The explicit escape hatches,
//! `arena[idx]` and [`SlotArena::erase_unchecked`], skip validation; misuse
//! of them panics or corrupts the free list but never touches memory
//! unsafely.
//!
//! Only indices are stable across growth. References into the arena are
//! invalidated by any `&mut` call, as usual; with the [`Chunked`] backing
//! the slots additionally keep their addresses when the arena grows.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod slot;
pub mod store;

// Public re-exports for the primary API surface.
pub use arena::SlotArena;
pub use config::{ArenaConfig, ConfigError};
pub use slot::Slot;
pub use store::{Backing, Chunked, ChunkedStore, Contiguous, SlotStore, VecStore};
pub use thicket_core::{ArenaError, Idx};
