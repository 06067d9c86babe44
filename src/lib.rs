//! # ddt-rs: Diagnostic Decision Trees from Fault Trees
//!
//! **`ddt-rs`** converts a **fault tree** (a boolean failure model built from
//! AND/OR gates over basic events, each with a failure probability and an
//! inspection cost) into a **diagnostic decision tree** (a binary structure
//! telling a diagnostician which basic event to test next, given prior
//! outcomes, to determine system failure with minimal expected height or
//! expected cost).
//!
//! ## What is a DDT?
//!
//! A diagnostic decision tree tests one basic event per vertex and branches
//! on the outcome; its terminals declare the system diagnosed safe (Zero) or
//! failed (One). A good DDT reaches a diagnosis after few, cheap tests — the
//! synthesis algorithms here trade optimality against running time.
//!
//! ## Synthesis algorithms
//!
//! - **Exact** ([`exact::eda`], [`exact::eda_cost`]): exhaustive search over
//!   variable orderings via boolean restriction. Optimal, exponential;
//!   the ground truth for small trees.
//! - **Bottom-up** ([`bottom_up::buda`], [`bottom_up::buda_cost`]):
//!   post-order composition of per-gate diagrams with a cost-efficiency
//!   ordering heuristic.
//! - **Cut-set / path-set driven** ([`greedy`]): greedy top-down descent over
//!   the tree's minimal cut sets or path sets, in probability-, size-, and
//!   cost-guided variants.
//!
//! The heuristic outputs may re-test an already-decided variable along a
//! path; [`Ddt::compress`][crate::ddt::Ddt::compress] removes those
//! redundancies afterwards.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ddt_rs::greedy::cuda_prob;
//! use ddt_rs::tree::FaultTree;
//!
//! // 1. Build the fault tree bottom-up through the manager.
//! let mut ft = FaultTree::new();
//! let a = ft.basic_event("A", 0.1, 1.0).unwrap();
//! let b = ft.basic_event("B", 0.2, 2.0).unwrap();
//! let c = ft.basic_event("C", 0.3, 1.0).unwrap();
//! let g1 = ft.and_gate("G1", [b, c]).unwrap();
//! ft.or_gate("Top", [a, g1]).unwrap();
//!
//! // 2. Synthesize a diagnostic strategy.
//! let ddt = cuda_prob(&ft).unwrap().compress();
//!
//! // 3. The diagram reproduces the tree's failure probability.
//! let u = ft.unreliability().unwrap();
//! assert!((ddt.failure_probability() - u).abs() < 1e-9);
//! println!("expected number of tests: {}", ddt.expected_height());
//! println!("expected test cost: {}", ddt.expected_cost());
//! ```
//!
//! ## Core Components
//!
//! - **[`tree`]**: the [`FaultTree`][crate::tree::FaultTree] model —
//!   construction, unreliability propagation, vertex queries.
//! - **[`sets`]**: minimal cut-set and path-set enumeration with antichain
//!   reduction.
//! - **[`ddt`]**: the [`Ddt`][crate::ddt::Ddt] model — probabilistic metrics
//!   and DAG compression.
//! - **[`dot`]**: Graphviz visualization of synthesized diagrams.
//!
//! ## A Note on Blow-up
//!
//! Minimal-set enumeration and the exact search are exponential by nature.
//! The crate imposes no internal timeout; callers wanting a wall-clock bound
//! wrap the (pure, idempotent) calls in their own budget.

pub mod bottom_up;
pub mod ddt;
pub mod dot;
pub mod error;
pub mod exact;
pub mod expr;
pub mod greedy;
pub mod paths;
pub mod sets;
pub mod tree;
pub mod types;
