//! The diagnostic decision tree (DDT) model.
//!
//! A [`Ddt`] tells a diagnostician which basic event to test next given the
//! outcomes observed so far. It is a binary structure: a decision vertex
//! tests one variable and branches on the outcome (`low` = did not fail,
//! `high` = failed); the terminals declare the system diagnosed safe
//! ([`Ddt::Zero`]) or failed ([`Ddt::One`]).
//!
//! All metrics are pure recursive folds. The only structural operation is
//! [`compress`][Ddt::compress], which removes redundant re-tests of a
//! variable whose outcome is already fixed on the current path.

use std::collections::HashSet;
use std::fmt;

use crate::types::Var;

/// A decision vertex: test `var`, branch on the outcome.
///
/// `prob` is the probability that the tested variable fails (outcome 1);
/// `cost` is its inspection cost. `low` is reached on outcome 0, `high` on
/// outcome 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub var: Var,
    pub prob: f64,
    pub cost: f64,
    pub low: Ddt,
    pub high: Ddt,
}

/// A diagnostic decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Ddt {
    /// Diagnosed: the system did not fail.
    Zero,
    /// Diagnosed: the system failed.
    One,
    /// Test a variable and branch.
    Decision(Box<Decision>),
}

impl Ddt {
    /// Builds a decision vertex.
    pub fn decision(var: Var, prob: f64, cost: f64, low: Ddt, high: Ddt) -> Self {
        Ddt::Decision(Box::new(Decision { var, prob, cost, low, high }))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Ddt::Decision(_))
    }

    /// Number of vertices, terminals included.
    pub fn size(&self) -> usize {
        match self {
            Ddt::Zero | Ddt::One => 1,
            Ddt::Decision(d) => 1 + d.low.size() + d.high.size(),
        }
    }

    /// Probability that following the diagram ends in the One terminal.
    ///
    /// For a correctly synthesized diagram this equals the fault tree's
    /// unreliability.
    pub fn failure_probability(&self) -> f64 {
        match self {
            Ddt::Zero => 0.0,
            Ddt::One => 1.0,
            Ddt::Decision(d) => {
                (1.0 - d.prob) * d.low.failure_probability() + d.prob * d.high.failure_probability()
            }
        }
    }

    /// Probability-weighted number of tests until a terminal is reached.
    pub fn expected_height(&self) -> f64 {
        self.expected_height_from(0.0)
    }

    fn expected_height_from(&self, depth: f64) -> f64 {
        match self {
            Ddt::Zero | Ddt::One => depth,
            Ddt::Decision(d) => {
                (1.0 - d.prob) * d.low.expected_height_from(depth + 1.0)
                    + d.prob * d.high.expected_height_from(depth + 1.0)
            }
        }
    }

    /// Probability-weighted sum of test costs until a terminal is reached.
    pub fn expected_cost(&self) -> f64 {
        match self {
            Ddt::Zero | Ddt::One => 0.0,
            Ddt::Decision(d) => {
                d.cost + (1.0 - d.prob) * d.low.expected_cost() + d.prob * d.high.expected_cost()
            }
        }
    }

    /// Expected test cost conditioned on the diagnosis being "failed".
    ///
    /// Sums `path probability × path cost` over every root-to-terminal path
    /// that does *not* end in Zero, then divides by
    /// [`failure_probability`][Ddt::failure_probability]. A failure
    /// probability of exactly 0 is treated as a divisor of 1, yielding the
    /// raw unconditioned sum instead of a NaN.
    pub fn expected_cost_given_failure(&self) -> f64 {
        let sum = self.failure_cost_mass(1.0, 0.0);
        let fp = self.failure_probability();
        if fp == 0.0 {
            sum
        } else {
            sum / fp
        }
    }

    fn failure_cost_mass(&self, prob: f64, cost: f64) -> f64 {
        match self {
            Ddt::Zero => 0.0,
            // Any non-Zero terminal counts as failure; One is the only one.
            Ddt::One => prob * cost,
            Ddt::Decision(d) => {
                d.low.failure_cost_mass(prob * (1.0 - d.prob), cost + d.cost)
                    + d.high.failure_cost_mass(prob * d.prob, cost + d.cost)
            }
        }
    }

    /// Depth-first search for the first decision vertex testing `var`.
    pub fn find_decision(&self, var: Var) -> Option<&Decision> {
        match self {
            Ddt::Zero | Ddt::One => None,
            Ddt::Decision(d) => {
                if d.var == var {
                    Some(d)
                } else {
                    d.low.find_decision(var).or_else(|| d.high.find_decision(var))
                }
            }
        }
    }

    /// Removes redundant re-tests of already-decided variables.
    ///
    /// Walks root to terminals carrying the set of `(variable, outcome)`
    /// constraints fixed on the current path. A vertex re-testing a decided
    /// variable is replaced by its already-determined child. The result has
    /// no repeated variable on any root-to-terminal path; rendered as a DAG,
    /// equal subtrees under the same constraints become sharable.
    pub fn compress(&self) -> Ddt {
        self.compress_seen(&HashSet::new())
    }

    fn compress_seen(&self, seen: &HashSet<(Var, bool)>) -> Ddt {
        if let Ddt::Decision(d) = self {
            if seen.contains(&(d.var, false)) {
                return d.low.compress_seen(seen);
            }
            if seen.contains(&(d.var, true)) {
                return d.high.compress_seen(seen);
            }
            // Each branch gets its own extended copy of the constraints, so
            // the two recursions cannot interfere.
            let mut seen_low = seen.clone();
            seen_low.insert((d.var, false));
            let mut seen_high = seen.clone();
            seen_high.insert((d.var, true));
            Ddt::decision(
                d.var,
                d.prob,
                d.cost,
                d.low.compress_seen(&seen_low),
                d.high.compress_seen(&seen_high),
            )
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for Ddt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_level(f, 0)
    }
}

impl Ddt {
    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        let indent = "  ".repeat(level);
        match self {
            Ddt::Zero => writeln!(f, "{indent}- ZERO"),
            Ddt::One => writeln!(f, "{indent}- ONE"),
            Ddt::Decision(d) => {
                writeln!(f, "{indent}- {} (prob: {}, cost: {})", d.var, d.prob, d.cost)?;
                d.low.fmt_level(f, level + 1)?;
                d.high.fmt_level(f, level + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u32) -> Var {
        Var::new(id)
    }

    /// Test A (p=0.1, c=1); on failure done, otherwise test B (p=0.2, c=2).
    fn two_level() -> Ddt {
        Ddt::decision(
            v(0),
            0.1,
            1.0,
            Ddt::decision(v(1), 0.2, 2.0, Ddt::Zero, Ddt::One),
            Ddt::One,
        )
    }

    #[test]
    fn test_terminal_metrics() {
        assert_eq!(Ddt::Zero.failure_probability(), 0.0);
        assert_eq!(Ddt::One.failure_probability(), 1.0);
        assert_eq!(Ddt::One.expected_height(), 0.0);
        assert_eq!(Ddt::Zero.expected_cost(), 0.0);
        assert_eq!(Ddt::Zero.size(), 1);
    }

    #[test]
    fn test_failure_probability() {
        let ddt = two_level();
        // 0.1 * 1 + 0.9 * 0.2 = 0.28
        assert!((ddt.failure_probability() - 0.28).abs() < 1e-12);
    }

    #[test]
    fn test_expected_height() {
        let ddt = two_level();
        // 0.1 * 1 + 0.9 * 2 = 1.9
        assert!((ddt.expected_height() - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_expected_cost() {
        let ddt = two_level();
        // 1 + 0.9 * 2 = 2.8
        assert!((ddt.expected_cost() - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_expected_cost_given_failure() {
        let ddt = two_level();
        // Failure paths: A=1 (prob 0.1, cost 1) and A=0,B=1 (prob 0.18, cost 3).
        // Sum = 0.1 + 0.54 = 0.64; divided by fp 0.28.
        let expected = 0.64 / 0.28;
        assert!((ddt.expected_cost_given_failure() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_expected_cost_given_failure_degenerate() {
        // Failure is unreachable: the conditional cost is the raw sum (0),
        // not NaN from a 0/0.
        let ddt = Ddt::decision(v(0), 0.0, 1.0, Ddt::Zero, Ddt::One);
        assert_eq!(ddt.failure_probability(), 0.0);
        assert_eq!(ddt.expected_cost_given_failure(), 0.0);
    }

    #[test]
    fn test_find_decision() {
        let ddt = two_level();
        assert_eq!(ddt.find_decision(v(0)).unwrap().cost, 1.0);
        assert_eq!(ddt.find_decision(v(1)).unwrap().cost, 2.0);
        assert!(ddt.find_decision(v(9)).is_none());
    }

    #[test]
    fn test_compress_removes_redundant_retest() {
        // Re-testing A after A=0 is redundant: the retest collapses to its
        // low child.
        let ddt = Ddt::decision(
            v(0),
            0.1,
            1.0,
            Ddt::decision(v(0), 0.1, 1.0, Ddt::Zero, Ddt::One),
            Ddt::One,
        );
        let compressed = ddt.compress();
        assert_eq!(
            compressed,
            Ddt::decision(v(0), 0.1, 1.0, Ddt::Zero, Ddt::One)
        );
    }

    #[test]
    fn test_compress_keeps_clean_diagram() {
        let ddt = two_level();
        assert_eq!(ddt.compress(), ddt);
    }

    #[test]
    fn test_compress_idempotent() {
        let ddt = Ddt::decision(
            v(0),
            0.1,
            1.0,
            Ddt::decision(v(1), 0.2, 2.0, Ddt::decision(v(0), 0.1, 1.0, Ddt::Zero, Ddt::One), Ddt::One),
            Ddt::One,
        );
        let once = ddt.compress();
        assert_eq!(once.compress(), once);
    }

    #[test]
    fn test_display() {
        let text = two_level().to_string();
        assert!(text.contains("v0 (prob: 0.1, cost: 1)"));
        assert!(text.contains("- ONE"));
    }
}
