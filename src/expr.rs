//! Boolean restriction calculus for the exact search.
//!
//! [`BoolExpr`] is a boxed tagged variant over constants, basic-event
//! variables, and AND/OR gates. The exact search fixes variables one at a
//! time via [`restrict`][BoolExpr::restrict], which substitutes a constant
//! and folds it through the gates as ordinary boolean simplification; the
//! expression form avoids mutating a shared fault-tree graph mid-search.

use crate::error::FtError;
use crate::tree::{FaultTree, FtNodeKind};
use crate::types::{GateKind, NodeId, Var};

/// A boolean expression over basic-event variables.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExpr {
    Const(bool),
    Var(Var),
    Gate(GateKind, Vec<BoolExpr>),
}

impl BoolExpr {
    /// Builds a gate with constant folding:
    /// an absorbing constant child collapses the gate, identity constants are
    /// dropped, and a single surviving child replaces the gate.
    pub fn gate(kind: GateKind, children: Vec<BoolExpr>) -> Self {
        // For AND the absorbing constant is `false` and the identity `true`;
        // for OR the other way round.
        let absorbing = matches!(kind, GateKind::Or);
        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            match child {
                BoolExpr::Const(value) if value == absorbing => return BoolExpr::Const(absorbing),
                BoolExpr::Const(_) => {}
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => BoolExpr::Const(!absorbing),
            1 => kept.into_iter().next().unwrap(),
            _ => BoolExpr::Gate(kind, kept),
        }
    }

    /// Fixes `var` to `value` and folds the result.
    pub fn restrict(&self, var: Var, value: bool) -> BoolExpr {
        match self {
            BoolExpr::Const(c) => BoolExpr::Const(*c),
            BoolExpr::Var(v) => {
                if *v == var {
                    BoolExpr::Const(value)
                } else {
                    BoolExpr::Var(*v)
                }
            }
            BoolExpr::Gate(kind, children) => BoolExpr::gate(
                *kind,
                children.iter().map(|c| c.restrict(var, value)).collect(),
            ),
        }
    }

    /// True iff the expression is structurally guaranteed to evaluate to 0:
    /// a false constant, an AND with a provably-false child, or an OR whose
    /// children are all provably false. Unfixed variables are neither.
    pub fn is_false(&self) -> bool {
        match self {
            BoolExpr::Const(c) => !c,
            BoolExpr::Var(_) => false,
            BoolExpr::Gate(GateKind::And, children) => children.iter().any(BoolExpr::is_false),
            BoolExpr::Gate(GateKind::Or, children) => children.iter().all(BoolExpr::is_false),
        }
    }

    /// Dual of [`is_false`][BoolExpr::is_false].
    pub fn is_true(&self) -> bool {
        match self {
            BoolExpr::Const(c) => *c,
            BoolExpr::Var(_) => false,
            BoolExpr::Gate(GateKind::And, children) => children.iter().all(BoolExpr::is_true),
            BoolExpr::Gate(GateKind::Or, children) => children.iter().any(BoolExpr::is_true),
        }
    }
}

impl FaultTree {
    /// The boolean structure function of the tree, over interned variables.
    pub fn to_expr(&self) -> Result<BoolExpr, FtError> {
        Ok(self.expr_of(self.root()?))
    }

    fn expr_of(&self, id: NodeId) -> BoolExpr {
        match self.node(id).kind {
            FtNodeKind::BasicEvent { var, .. } => BoolExpr::Var(var),
            FtNodeKind::Gate { kind, ref children, .. } => {
                BoolExpr::Gate(kind, children.iter().map(|&c| self.expr_of(c)).collect())
            }
        }
    }
}
