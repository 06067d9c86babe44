//! Minimal cut-set and path-set enumeration.
//!
//! A *cut set* is a set of basic events whose joint failure is sufficient to
//! fail the system; a *path set* is the dual: a set of basic events whose
//! joint non-failure keeps the system safe. Both enumerations hang off
//! [`FaultTree`] and return families reduced to an antichain: no member is a
//! superset of another.
//!
//! Sets are [`BTreeSet`]s of interned [`Var`] ids, so hashing and subset
//! checks stay cheap even on deep trees.
//!
//! # Example
//!
//! ```
//! use ddt_rs::tree::FaultTree;
//!
//! let mut ft = FaultTree::new();
//! let a = ft.basic_event("A", 0.1, 1.0).unwrap();
//! let b = ft.basic_event("B", 0.2, 2.0).unwrap();
//! let c = ft.basic_event("C", 0.3, 1.0).unwrap();
//! let bc = ft.and_gate("G1", [b, c]).unwrap();
//! ft.or_gate("Top", [a, bc]).unwrap();
//!
//! // Minimal cut sets: {A}, {B, C}. Minimal path sets: {A, B}, {A, C}.
//! assert_eq!(ft.cut_sets().unwrap().len(), 2);
//! assert_eq!(ft.path_sets().unwrap().len(), 2);
//! ```
//!
//! # Performance
//!
//! Enumeration is exponential in the branching factor under AND/OR
//! alternation. That is inherent to minimal-set enumeration, not a defect;
//! callers wanting a bound must impose it around the call.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::error::FtError;
use crate::tree::{FaultTree, FtNodeKind};
use crate::types::{GateKind, NodeId, Var};

/// A set of basic-event variables.
pub type VarSet = BTreeSet<Var>;

/// An ordered family of variable sets. Order is observable: the size-driven
/// greedy variants break ties by family order.
pub type SetFamily = Vec<VarSet>;

/// Reduces a family to an antichain under set inclusion.
///
/// Duplicates are dropped, survivors are ordered by cardinality (ties by set
/// contents, for determinism), and a candidate is kept only if no previously
/// kept set is a subset of it.
pub fn reduce_to_antichain(sets: Vec<VarSet>) -> SetFamily {
    let unique: HashSet<VarSet> = sets.into_iter().collect();
    let mut sorted: Vec<VarSet> = unique.into_iter().collect();
    sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut result: SetFamily = Vec::new();
    for candidate in sorted {
        if !result.iter().any(|kept| kept.is_subset(&candidate)) {
            result.push(candidate);
        }
    }
    result
}

impl FaultTree {
    /// Enumerates the minimal cut sets of the tree.
    pub fn cut_sets(&self) -> Result<SetFamily, FtError> {
        let raw = self.enumerate_sets(self.root()?, GateKind::And);
        let reduced = reduce_to_antichain(raw);
        debug!("cut sets: {} minimal sets", reduced.len());
        Ok(reduced)
    }

    /// Enumerates the minimal path sets of the tree (the cut sets of the
    /// AND/OR-swapped dual).
    pub fn path_sets(&self) -> Result<SetFamily, FtError> {
        let raw = self.enumerate_sets(self.root()?, GateKind::Or);
        let reduced = reduce_to_antichain(raw);
        debug!("path sets: {} minimal sets", reduced.len());
        Ok(reduced)
    }

    /// Recursive enumeration. A gate of `product_kind` combines its
    /// children's families by Cartesian-product union; the other kind
    /// concatenates. `product_kind = And` yields cut sets, `Or` path sets.
    fn enumerate_sets(&self, id: NodeId, product_kind: GateKind) -> Vec<VarSet> {
        match self.node(id).kind {
            FtNodeKind::BasicEvent { var, .. } => {
                vec![VarSet::from([var])]
            }
            FtNodeKind::Gate { kind, ref children, .. } => {
                let child_families: Vec<Vec<VarSet>> = children
                    .iter()
                    .map(|&c| self.enumerate_sets(c, product_kind))
                    .collect();
                if kind == product_kind {
                    cartesian_union(child_families)
                } else {
                    child_families.into_iter().flatten().collect()
                }
            }
        }
    }
}

/// Every combination of one set per family, unioned into a single set.
fn cartesian_union(families: Vec<Vec<VarSet>>) -> Vec<VarSet> {
    let mut acc: Vec<VarSet> = vec![VarSet::new()];
    for family in families {
        let mut next = Vec::with_capacity(acc.len() * family.len());
        for partial in &acc {
            for set in &family {
                let mut merged = partial.clone();
                merged.extend(set.iter().copied());
                next.push(merged);
            }
        }
        acc = next;
    }
    acc
}
