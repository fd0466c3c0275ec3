//! Benchmark profiles for the Thicket arena workspace.
//!
//! - [`balanced_tree`]: complete `fanout`-ary tree of a given depth
//! - [`chain`]: a single path, the worst case for recursive walkers
//! - [`fragmented_arena`]: an arena with every other slot free

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use thicket_arena::{Idx, SlotArena};
use thicket_forest::{Forest, NodeId};

/// Build a complete tree with `fanout` children per inner node and
/// `depth` levels below the root. Payloads count up in pre-order.
///
/// Returns the forest and its root.
pub fn balanced_tree(depth: u32, fanout: u32) -> (Forest<u64>, NodeId) {
    let mut forest = Forest::new();
    let root = forest.emplace(0).unwrap();
    let mut level = vec![root];
    let mut next_value = 1;
    for _ in 0..depth {
        let mut below = Vec::with_capacity(level.len() * fanout as usize);
        for &parent in &level {
            for _ in 0..fanout {
                let child = forest.emplace(next_value).unwrap();
                next_value += 1;
                forest.add_child(parent, child).unwrap();
                below.push(child);
            }
        }
        level = below;
    }
    (forest, root)
}

/// Build a single path of `len` nodes. Returns the forest and its root.
pub fn chain(len: u64) -> (Forest<u64>, NodeId) {
    let mut forest = Forest::new();
    let root = forest.emplace(0).unwrap();
    let mut tip = root;
    for value in 1..len {
        let next = forest.emplace(value).unwrap();
        forest.add_child(tip, next).unwrap();
        tip = next;
    }
    (forest, root)
}

/// Fill `slots` slots then erase every odd index, leaving a free list that
/// alternates with live values. Returns the arena and its live handles.
pub fn fragmented_arena(slots: u32) -> (SlotArena<u64>, Vec<Idx<u64>>) {
    let mut arena = SlotArena::with_capacity(slots as usize);
    let handles: Vec<_> = (0..slots as u64)
        .map(|v| arena.emplace(v).unwrap())
        .collect();
    let mut live = Vec::with_capacity(handles.len() / 2 + 1);
    for (i, idx) in handles.into_iter().enumerate() {
        if i % 2 == 1 {
            arena.erase(idx);
        } else {
            live.push(idx);
        }
    }
    (arena, live)
}
