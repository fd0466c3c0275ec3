//! Test utilities for Thicket development.
//!
//! Provides the canonical four-node scenario, deterministic random forests
//! and arena churn scripts, and structural checkers that go beyond the
//! per-crate `debug_validate_invariants` methods.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    assert_acyclic, assert_forest_invariants, churn_script, random_forest, scenario, ChurnOp,
    Scenario,
};
