//! Exact synthesis: exhaustive search over variable orderings.
//!
//! [`eda`] minimizes expected height, [`eda_cost`] minimizes expected cost.
//! Both recurse over Shannon-style restrictions of the tree's structure
//! function: fix a candidate variable to 0 and to 1, fold the constants
//! through the gates, solve both sub-problems, and keep the first variable
//! achieving the minimal objective. The search is `O(2^n · n)` restriction
//! evaluations — exactness, not scalability, is the point; it serves as the
//! ground-truth baseline for the heuristics.
//!
//! Per the interface contract, the caller supplies the variable set and the
//! probability/cost mappings explicitly instead of having them re-derived
//! internally; [`FaultTree`][crate::tree::FaultTree] exposes
//! `to_expr`/`variables`/`probabilities`/`costs` for exactly that.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::ddt::Ddt;
use crate::error::SynthesisError;
use crate::expr::BoolExpr;
use crate::types::Var;

#[derive(Debug, Copy, Clone)]
enum Objective {
    Height,
    Cost,
}

/// Synthesizes the decision tree with minimal expected height.
///
/// The cost mapping only annotates the produced decision vertices; it does
/// not influence the search.
pub fn eda(
    expr: &BoolExpr,
    variables: &BTreeSet<Var>,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
) -> Result<Ddt, SynthesisError> {
    search(expr, variables, probs, costs, Objective::Height)
}

/// Synthesizes the decision tree with minimal expected cost.
pub fn eda_cost(
    expr: &BoolExpr,
    variables: &BTreeSet<Var>,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
) -> Result<Ddt, SynthesisError> {
    search(expr, variables, probs, costs, Objective::Cost)
}

fn search(
    expr: &BoolExpr,
    variables: &BTreeSet<Var>,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
    objective: Objective,
) -> Result<Ddt, SynthesisError> {
    if expr.is_false() {
        return Ok(Ddt::Zero);
    }
    if expr.is_true() {
        return Ok(Ddt::One);
    }

    let mut best: Option<(f64, Ddt)> = None;

    for &var in variables {
        let p = lookup(probs, var)?;
        let c = lookup(costs, var)?;

        let mut remaining = variables.clone();
        remaining.remove(&var);

        let low = search(&expr.restrict(var, false), &remaining, probs, costs, objective)?;
        let high = search(&expr.restrict(var, true), &remaining, probs, costs, objective)?;

        let score = match objective {
            Objective::Height => {
                1.0 + (1.0 - p) * low.expected_height() + p * high.expected_height()
            }
            Objective::Cost => c + (1.0 - p) * low.expected_cost() + p * high.expected_cost(),
        };
        debug!("candidate {var}: score {score}");

        // Strict comparison keeps the first variable reaching the minimum.
        if best.as_ref().map_or(true, |(b, _)| score < *b) {
            best = Some((score, Ddt::decision(var, p, c, low, high)));
        }
    }

    best.map(|(_, ddt)| ddt).ok_or(SynthesisError::NoCandidate)
}

fn lookup(map: &HashMap<Var, f64>, var: Var) -> Result<f64, SynthesisError> {
    map.get(&var).copied().ok_or(SynthesisError::MissingMapping(var))
}
