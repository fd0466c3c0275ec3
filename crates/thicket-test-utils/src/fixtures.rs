//! Reusable forest and arena fixtures.
//!
//! - [`scenario`]: root with two children, one grandchild under the first.
//! - [`random_forest`]: seeded forest of random shape.
//! - [`churn_script`]: seeded emplace/erase sequence for arena stress tests.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thicket_arena::Backing;
use thicket_forest::{Forest, NodeId};

/// Indices of the canonical scenario nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub root: NodeId,
    pub child_a: NodeId,
    pub child_b: NodeId,
    pub grandchild: NodeId,
}

/// Build the canonical scenario in a fresh forest.
///
/// ```text
/// root(0) ─┬─ childA(1) ── grandchild(3)
///          └─ childB(2)
/// ```
pub fn scenario() -> (Forest<&'static str>, Scenario) {
    let mut forest = Forest::new();
    let root = forest.emplace("root").unwrap();
    let child_a = forest.emplace("childA").unwrap();
    forest.add_child(root, child_a).unwrap();
    let child_b = forest.emplace("childB").unwrap();
    forest.add_child(root, child_b).unwrap();
    let grandchild = forest.emplace("grandchild").unwrap();
    forest.add_child(child_a, grandchild).unwrap();
    (
        forest,
        Scenario {
            root,
            child_a,
            child_b,
            grandchild,
        },
    )
}

/// Build a forest of `nodes` nodes with payloads `0..nodes`.
///
/// Each node after the first attaches to a uniformly chosen earlier node,
/// or stays a root with probability 1/8. Same seed, same forest.
pub fn random_forest(seed: u64, nodes: u32) -> Forest<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut forest = Forest::new();
    let mut ids = Vec::with_capacity(nodes as usize);
    for value in 0..nodes {
        let id = forest.emplace(value).unwrap();
        if !ids.is_empty() && rng.next_u32() % 8 != 0 {
            let parent = ids[rng.next_u32() as usize % ids.len()];
            forest.add_child(parent, id).unwrap();
        }
        ids.push(id);
    }
    forest
}

/// One step of an arena churn script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Emplace the given value.
    Emplace(u64),
    /// Erase the n-th live handle (modulo the live count).
    EraseNth(usize),
}

/// A seeded sequence of `len` churn steps, roughly 60% emplaces.
pub fn churn_script(seed: u64, len: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.next_u32() % 10 < 6 {
                ChurnOp::Emplace(rng.next_u64())
            } else {
                ChurnOp::EraseNth(rng.next_u32() as usize)
            }
        })
        .collect()
}

/// Assert the forest has no parent cycles: walking up from any node
/// reaches a root within `size()` steps.
pub fn assert_acyclic<T, B: Backing>(forest: &Forest<T, B>) {
    let limit = forest.size();
    for (id, _) in forest.iter() {
        let mut cursor = forest.get_parent(id).unwrap();
        let mut steps = 0;
        while let Some(parent) = cursor {
            steps += 1;
            assert!(steps <= limit, "cycle above node {id}");
            cursor = forest.get_parent(parent).unwrap();
        }
    }
}

/// Full structural check: arena free chains, link symmetry, acyclicity,
/// and that every live node is reachable from exactly one root.
pub fn assert_forest_invariants<T, B: Backing>(forest: &Forest<T, B>) {
    forest.debug_validate_invariants();
    assert_acyclic(forest);
    let reached: usize = forest
        .roots()
        .map(|root| forest.sort(root).unwrap().len())
        .sum();
    assert_eq!(reached, forest.size(), "nodes unreachable from any root");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_has_expected_indices() {
        let (forest, s) = scenario();
        assert_eq!(s.root.raw(), 0);
        assert_eq!(s.grandchild.raw(), 3);
        assert_eq!(forest.size(), 4);
        assert_forest_invariants(&forest);
    }

    #[test]
    fn random_forest_is_deterministic() {
        let a = random_forest(7, 200);
        let b = random_forest(7, 200);
        let shape = |f: &Forest<u32>| {
            f.iter()
                .map(|(id, _)| f.get_parent(id).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&a), shape(&b));
        assert_forest_invariants(&a);
    }

    #[test]
    fn churn_script_mixes_ops() {
        let script = churn_script(3, 500);
        assert_eq!(script, churn_script(3, 500));
        assert!(script.iter().any(|op| matches!(op, ChurnOp::Emplace(_))));
        assert!(script.iter().any(|op| matches!(op, ChurnOp::EraseNth(_))));
    }
}
