//! Bottom-up synthesis: post-order composition of per-gate diagrams.
//!
//! A basic event becomes a one-level diagram. A gate orders its children by
//! a cost-efficiency heuristic and chains their diagrams by *grafting*: an
//! AND gate fails only if all children fail, so every One terminal of the
//! running diagram is substituted with the next child's diagram ("this child
//! failed, keep testing the next"); an OR gate is dually chained through its
//! Zero terminals ("this child alone did not fail, keep checking").
//!
//! [`buda`] orders children by subtree unreliability (raw probability of the
//! gate's direct children), [`buda_cost`] orders the transformed child
//! diagrams by `expected_cost / (1 − failure_probability)` for AND and
//! `expected_cost / failure_probability` for OR. A single top-down pass per
//! gate, no backtracking — linear in diagram size, optimal in neither
//! objective.

use log::debug;

use crate::ddt::Ddt;
use crate::error::FtError;
use crate::paths::Terminal;
use crate::tree::{FaultTree, FtNodeKind};
use crate::types::{GateKind, NodeId};

/// Bottom-up synthesis ordered by failure probability.
pub fn buda(ft: &FaultTree) -> Result<Ddt, FtError> {
    Ok(build(ft, ft.root()?, &Ordering::Probability))
}

/// Bottom-up synthesis ordered by cost efficiency.
pub fn buda_cost(ft: &FaultTree) -> Result<Ddt, FtError> {
    Ok(build(ft, ft.root()?, &Ordering::CostEfficiency))
}

enum Ordering {
    /// Order a gate's direct children by their subtree unreliability:
    /// ascending for AND, descending for OR.
    Probability,
    /// Order the transformed child diagrams by cost per unit of resolving
    /// probability; degenerate denominators score +∞ and go last.
    CostEfficiency,
}

fn build(ft: &FaultTree, id: NodeId, ordering: &Ordering) -> Ddt {
    let (kind, children) = match ft.node(id).kind {
        FtNodeKind::BasicEvent { var, prob, cost } => {
            return Ddt::decision(var, prob, cost, Ddt::Zero, Ddt::One);
        }
        FtNodeKind::Gate { kind, ref children, .. } => (kind, children.clone()),
    };

    let ordered: Vec<Ddt> = match ordering {
        Ordering::Probability => {
            let mut ids = children;
            ids.sort_by(|&a, &b| {
                let pa = ft.unreliability_of(a);
                let pb = ft.unreliability_of(b);
                match kind {
                    GateKind::And => pa.total_cmp(&pb),
                    GateKind::Or => pb.total_cmp(&pa),
                }
            });
            ids.into_iter().map(|c| build(ft, c, ordering)).collect()
        }
        Ordering::CostEfficiency => {
            let mut subtrees: Vec<Ddt> =
                children.into_iter().map(|c| build(ft, c, ordering)).collect();
            subtrees.sort_by(|a, b| {
                let ra = efficiency(a, kind);
                let rb = efficiency(b, kind);
                ra.total_cmp(&rb)
            });
            subtrees
        }
    };

    debug!("grafting {} children under {} gate '{}'", ordered.len(), kind, ft.name_of(id));
    let target = match kind {
        GateKind::And => Terminal::One,
        GateKind::Or => Terminal::Zero,
    };
    let mut acc = ordered[0].clone();
    for next in &ordered[1..] {
        acc = replace_terminals(&acc, target, next);
    }
    acc
}

fn efficiency(ddt: &Ddt, kind: GateKind) -> f64 {
    let fp = ddt.failure_probability();
    let denom = match kind {
        GateKind::And => 1.0 - fp,
        GateKind::Or => fp,
    };
    if denom <= 0.0 {
        f64::INFINITY
    } else {
        ddt.expected_cost() / denom
    }
}

/// Replaces every terminal of the target kind with a fresh copy of
/// `replacement`. Decision vertices and the other terminal are untouched.
pub fn replace_terminals(ddt: &Ddt, target: Terminal, replacement: &Ddt) -> Ddt {
    match (ddt, target) {
        (Ddt::Zero, Terminal::Zero) | (Ddt::One, Terminal::One) => replacement.clone(),
        (Ddt::Zero, _) | (Ddt::One, _) => ddt.clone(),
        (Ddt::Decision(d), _) => Ddt::decision(
            d.var,
            d.prob,
            d.cost,
            replace_terminals(&d.low, target, replacement),
            replace_terminals(&d.high, target, replacement),
        ),
    }
}
