//! Greedy top-down synthesis driven by minimal cut sets or path sets.
//!
//! Each variant derives its set family from the tree, then repeatedly picks
//! a candidate set, picks a variable inside it, and recurses on two reduced
//! families: the branch where the variable did not fail drops or shrinks the
//! sets it can no longer complete, the other branch records the progress it
//! made. Greedy best-first descent with no backtracking — polynomial in the
//! family size, which is itself the (inherently exponential) bottleneck.
//!
//! Cut-set variants: [`cuda_prob`], [`cuda_size`], [`cuda_cost`].
//! Path-set variants: [`pada_prob`], [`pada_size`], [`pada_cost`].
//!
//! Branch convention, both families: `low` = tested variable did not fail,
//! `high` = it failed. For cut sets, `low` drops every set containing the
//! variable (those causes are exonerated) and `high` strikes the variable
//! from memberships; for path sets the roles swap, so that an empty family
//! means "failure is certain" and an emptied set means "verified safe".

use std::collections::HashMap;

use log::debug;

use crate::ddt::Ddt;
use crate::error::FtError;
use crate::sets::{SetFamily, VarSet};
use crate::tree::FaultTree;
use crate::types::Var;

/// Cut-set synthesis: likeliest cause first, least likely event inside it.
pub fn cuda_prob(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.cut_sets()?;
    Ok(synth(ft, family, FamilyKind::Cut, SetRule::LikeliestProduct, VarRule::MinProb))
}

/// Cut-set synthesis: shortest cut set first (family-order ties), least
/// likely event inside it.
pub fn cuda_size(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.cut_sets()?;
    Ok(synth(ft, family, FamilyKind::Cut, SetRule::Shortest, VarRule::MinProb))
}

/// Cost-aware cut-set synthesis: cheapest cut set per unit likelihood,
/// cheapest event per unit non-failure inside it.
pub fn cuda_cost(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.cut_sets()?;
    Ok(synth(ft, family, FamilyKind::Cut, SetRule::CheapestPerProduct, VarRule::CheapestPerNonFailure))
}

/// Path-set synthesis: likeliest-to-hold path set first, most likely event
/// inside it.
pub fn pada_prob(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.path_sets()?;
    Ok(synth(ft, family, FamilyKind::Path, SetRule::LikeliestProduct, VarRule::MaxProb))
}

/// Path-set synthesis: shortest path set first, most likely event inside it.
pub fn pada_size(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.path_sets()?;
    Ok(synth(ft, family, FamilyKind::Path, SetRule::Shortest, VarRule::MaxProb))
}

/// Cost-aware path-set synthesis: cheapest path set per unit of holding
/// probability, cheapest event per unit failure inside it.
pub fn pada_cost(ft: &FaultTree) -> Result<Ddt, FtError> {
    let family = ft.path_sets()?;
    Ok(synth(ft, family, FamilyKind::Path, SetRule::CheapestPerProduct, VarRule::CheapestPerFailure))
}

#[derive(Debug, Copy, Clone)]
enum FamilyKind {
    Cut,
    Path,
}

#[derive(Debug, Copy, Clone)]
enum SetRule {
    /// Maximize the product of member probabilities (cut sets) or complement
    /// probabilities (path sets).
    LikeliestProduct,
    /// Minimize Σcost / product; a zero product scores +∞.
    CheapestPerProduct,
    /// Fewest members; ties broken by family order.
    Shortest,
}

#[derive(Debug, Copy, Clone)]
enum VarRule {
    MinProb,
    MaxProb,
    /// Minimize cost / (1 − prob); prob 1 scores +∞.
    CheapestPerNonFailure,
    /// Minimize cost / prob; prob 0 scores +∞.
    CheapestPerFailure,
}

fn synth(
    ft: &FaultTree,
    family: SetFamily,
    kind: FamilyKind,
    set_rule: SetRule,
    var_rule: VarRule,
) -> Ddt {
    let probs = ft.probabilities();
    let costs = ft.costs();
    synth_family(&family, kind, set_rule, var_rule, &probs, &costs)
}

fn synth_family(
    family: &SetFamily,
    kind: FamilyKind,
    set_rule: SetRule,
    var_rule: VarRule,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
) -> Ddt {
    if family.is_empty() {
        // No set left to complete: failure is impossible (cut sets) or
        // certain (path sets).
        return match kind {
            FamilyKind::Cut => Ddt::Zero,
            FamilyKind::Path => Ddt::One,
        };
    }
    if family.iter().any(|s| s.is_empty()) {
        // Some set is fully confirmed.
        return match kind {
            FamilyKind::Cut => Ddt::One,
            FamilyKind::Path => Ddt::Zero,
        };
    }

    let set = select_set(family, kind, set_rule, probs, costs);
    let var = select_var(set, var_rule, probs, costs);
    let p = probs[&var];
    let c = costs[&var];
    debug!("test {var} (p={p}, c={c}) out of {} sets", family.len());

    let (low_family, high_family) = match kind {
        FamilyKind::Cut => (drop_containing(family, var), strike_var(family, var)),
        FamilyKind::Path => (strike_var(family, var), drop_containing(family, var)),
    };
    Ddt::decision(
        var,
        p,
        c,
        synth_family(&low_family, kind, set_rule, var_rule, probs, costs),
        synth_family(&high_family, kind, set_rule, var_rule, probs, costs),
    )
}

/// Removes every set that contains `var`.
fn drop_containing(family: &SetFamily, var: Var) -> SetFamily {
    family.iter().filter(|s| !s.contains(&var)).cloned().collect()
}

/// Removes `var` from every set's membership.
fn strike_var(family: &SetFamily, var: Var) -> SetFamily {
    family
        .iter()
        .map(|s| s.iter().copied().filter(|&v| v != var).collect())
        .collect()
}

fn select_set<'a>(
    family: &'a SetFamily,
    kind: FamilyKind,
    rule: SetRule,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
) -> &'a VarSet {
    let product = |set: &VarSet| -> f64 {
        set.iter()
            .map(|v| match kind {
                FamilyKind::Cut => probs[v],
                FamilyKind::Path => 1.0 - probs[v],
            })
            .product()
    };

    let mut best: Option<(f64, &VarSet)> = None;
    for set in family {
        let (score, better) = match rule {
            SetRule::LikeliestProduct => {
                let score = product(set);
                (score, best.map_or(true, |(b, _)| score > b))
            }
            SetRule::CheapestPerProduct => {
                let p = product(set);
                let cost: f64 = set.iter().map(|v| costs[v]).sum();
                let score = if p <= 0.0 { f64::INFINITY } else { cost / p };
                (score, best.map_or(true, |(b, _)| score < b))
            }
            SetRule::Shortest => {
                let score = set.len() as f64;
                (score, best.map_or(true, |(b, _)| score < b))
            }
        };
        if better {
            best = Some((score, set));
        }
    }
    // `family` is non-empty here, so a set was always kept.
    best.map(|(_, set)| set).expect("non-empty family")
}

fn select_var(
    set: &VarSet,
    rule: VarRule,
    probs: &HashMap<Var, f64>,
    costs: &HashMap<Var, f64>,
) -> Var {
    let mut best: Option<(f64, Var)> = None;
    for &var in set {
        let p = probs[&var];
        let (score, better) = match rule {
            VarRule::MinProb => (p, best.map_or(true, |(b, _)| p < b)),
            VarRule::MaxProb => (p, best.map_or(true, |(b, _)| p > b)),
            VarRule::CheapestPerNonFailure => {
                let denom = 1.0 - p;
                let score = if denom <= 0.0 { f64::INFINITY } else { costs[&var] / denom };
                (score, best.map_or(true, |(b, _)| score < b))
            }
            VarRule::CheapestPerFailure => {
                let score = if p <= 0.0 { f64::INFINITY } else { costs[&var] / p };
                (score, best.map_or(true, |(b, _)| score < b))
            }
        };
        if better {
            best = Some((score, var));
        }
    }
    best.map(|(_, var)| var).expect("non-empty set")
}
