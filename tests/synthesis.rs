//! Cross-algorithm properties: every synthesis strategy on the same tree
//! must reproduce the tree's unreliability, compression must not change what
//! a diagram computes, and the exact search must dominate the heuristics.

use test_log::test;

use ddt_rs::bottom_up::{buda, buda_cost};
use ddt_rs::ddt::Ddt;
use ddt_rs::exact::{eda, eda_cost};
use ddt_rs::expr::BoolExpr;
use ddt_rs::greedy::{cuda_cost, cuda_prob, cuda_size, pada_cost, pada_prob, pada_size};
use ddt_rs::paths::Terminal;
use ddt_rs::tree::FaultTree;
use ddt_rs::types::GateKind;

fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{context}: {actual} != {expected}"
    );
}

/// The worked example: Top = OR(A, AND(B, C)).
fn example_tree() -> FaultTree {
    let mut ft = FaultTree::new();
    let a = ft.basic_event("A", 0.1, 1.0).unwrap();
    let b = ft.basic_event("B", 0.2, 2.0).unwrap();
    let c = ft.basic_event("C", 0.3, 1.0).unwrap();
    let bc = ft.and_gate("G1", [b, c]).unwrap();
    ft.or_gate("Top", [a, bc]).unwrap();
    ft
}

/// A 4-variable tree with alternating gates.
fn alternating_tree() -> FaultTree {
    let mut ft = FaultTree::new();
    let a = ft.basic_event("A", 0.05, 4.0).unwrap();
    let b = ft.basic_event("B", 0.4, 1.0).unwrap();
    let c = ft.basic_event("C", 0.25, 2.0).unwrap();
    let d = ft.basic_event("D", 0.6, 0.5).unwrap();
    let g1 = ft.or_gate("G1", [a, b]).unwrap();
    let g2 = ft.or_gate("G2", [c, d]).unwrap();
    ft.and_gate("Top", [g1, g2]).unwrap();
    ft
}

fn all_strategies(ft: &FaultTree) -> Vec<(&'static str, Ddt)> {
    let expr = ft.to_expr().unwrap();
    let vars = ft.variables();
    let probs = ft.probabilities();
    let costs = ft.costs();
    vec![
        ("EDA", eda(&expr, &vars, &probs, &costs).unwrap()),
        ("EDAcost", eda_cost(&expr, &vars, &probs, &costs).unwrap()),
        ("BUDA", buda(ft).unwrap()),
        ("BUDAcost", buda_cost(ft).unwrap()),
        ("CuDAprob", cuda_prob(ft).unwrap()),
        ("CuDAsize", cuda_size(ft).unwrap()),
        ("CuDAcost", cuda_cost(ft).unwrap()),
        ("PaDAprob", pada_prob(ft).unwrap()),
        ("PaDAsize", pada_size(ft).unwrap()),
        ("PaDAcost", pada_cost(ft).unwrap()),
    ]
}

#[test]
fn probability_conservation_all_strategies() {
    for ft in [example_tree(), alternating_tree()] {
        let u = ft.unreliability().unwrap();
        for (name, ddt) in all_strategies(&ft) {
            assert_close(ddt.failure_probability(), u, name);
        }
    }
}

#[test]
fn one_terminals_carry_exactly_the_failure_mass() {
    // Zero and One are the only terminal kinds, so "not Zero" and "One"
    // must agree: the probability mass reaching non-Zero terminals is the
    // failure probability itself.
    let ft = example_tree();
    for (name, ddt) in all_strategies(&ft) {
        let mass: f64 = ddt
            .paths()
            .filter(|p| p.terminal.is_failure())
            .map(|p| {
                assert_eq!(p.terminal, Terminal::One, "{name}: unexpected terminal kind");
                p.steps
                    .iter()
                    .map(|&(var, outcome)| {
                        let prob = ft.prob_of(var);
                        if outcome {
                            prob
                        } else {
                            1.0 - prob
                        }
                    })
                    .product::<f64>()
            })
            .sum();
        assert_close(mass, ddt.failure_probability(), name);
    }
}

#[test]
fn compression_preserves_metrics_and_is_idempotent() {
    for ft in [example_tree(), alternating_tree()] {
        for (name, ddt) in all_strategies(&ft) {
            let compressed = ddt.compress();
            assert_close(compressed.failure_probability(), ddt.failure_probability(), name);
            assert_close(compressed.expected_height(), ddt.expected_height(), name);
            assert_close(compressed.expected_cost(), ddt.expected_cost(), name);
            assert!(!compressed.has_repeated_test(), "{name}: repeated test survives");
            assert_eq!(compressed.compress(), compressed, "{name}: not idempotent");
        }
    }
}

#[test]
fn compression_removes_retests_of_shared_events() {
    // A leaf shared between two gates makes the bottom-up composition
    // re-test it along one path.
    let mut ft = FaultTree::new();
    let a = ft.basic_event("A", 0.5, 1.0).unwrap();
    let b = ft.basic_event("B", 0.5, 1.0).unwrap();
    let c = ft.basic_event("C", 0.5, 1.0).unwrap();
    let g1 = ft.or_gate("G1", [a, b]).unwrap();
    let g2 = ft.or_gate("G2", [a, c]).unwrap();
    ft.and_gate("Top", [g1, g2]).unwrap();

    let ddt = buda(&ft).unwrap();
    assert!(ddt.has_repeated_test());

    let compressed = ddt.compress();
    assert!(!compressed.has_repeated_test());
    assert_eq!(compressed.compress(), compressed);

    // Pruning the contradictory path restores the true failure probability
    // of A ∨ (B ∧ C), which the gate-independent fold understates.
    assert_close(compressed.failure_probability(), 0.625, "compressed buda");
}

#[test]
fn exact_height_dominates_heuristics() {
    for ft in [example_tree(), alternating_tree()] {
        let optimal = eda(&ft.to_expr().unwrap(), &ft.variables(), &ft.probabilities(), &ft.costs())
            .unwrap()
            .expected_height();
        for (name, ddt) in all_strategies(&ft) {
            assert!(
                optimal <= ddt.expected_height() + 1e-9,
                "{name}: EDA height {optimal} beaten by {}",
                ddt.expected_height()
            );
        }
    }
}

#[test]
fn exact_cost_dominates_heuristics() {
    for ft in [example_tree(), alternating_tree()] {
        let optimal =
            eda_cost(&ft.to_expr().unwrap(), &ft.variables(), &ft.probabilities(), &ft.costs())
                .unwrap()
                .expected_cost();
        for (name, ddt) in all_strategies(&ft) {
            assert!(
                optimal <= ddt.expected_cost() + 1e-9,
                "{name}: EDAcost {optimal} beaten by {}",
                ddt.expected_cost()
            );
        }
    }
}

#[test]
fn cut_sets_are_sufficient_causes() {
    // Setting exactly a cut set's members to failed must fail the system.
    for ft in [example_tree(), alternating_tree()] {
        let expr = ft.to_expr().unwrap();
        for cut in ft.cut_sets().unwrap() {
            let mut restricted = expr.clone();
            for var in ft.variables() {
                restricted = restricted.restrict(var, cut.contains(&var));
            }
            assert!(restricted.is_true(), "cut set {cut:?} does not fail the system");
        }
    }
}

#[test]
fn path_sets_are_sufficient_guards() {
    // Setting exactly a path set's members to working must keep the system
    // safe, whatever the other events do; check the worst case (all fail).
    for ft in [example_tree(), alternating_tree()] {
        let expr = ft.to_expr().unwrap();
        for path in ft.path_sets().unwrap() {
            let mut restricted = expr.clone();
            for var in ft.variables() {
                restricted = restricted.restrict(var, !path.contains(&var));
            }
            assert!(restricted.is_false(), "path set {path:?} does not protect the system");
        }
    }
}

#[test]
fn worked_example_end_to_end() {
    let ft = example_tree();
    assert_close(ft.unreliability().unwrap(), 0.154, "unreliability");

    let names = |family: Vec<std::collections::BTreeSet<ddt_rs::types::Var>>| -> Vec<Vec<String>> {
        family
            .into_iter()
            .map(|s| s.into_iter().map(|v| ft.var_name(v).to_string()).collect())
            .collect()
    };
    assert_eq!(names(ft.cut_sets().unwrap()), vec![vec!["A"], vec!["B", "C"]]);
    assert_eq!(names(ft.path_sets().unwrap()), vec![vec!["A", "B"], vec!["A", "C"]]);

    // CuDAprob tests A first: the {A} singleton (0.1) beats {B, C} (0.06).
    let ddt = cuda_prob(&ft).unwrap();
    let Ddt::Decision(root) = &ddt else { panic!("expected a decision root") };
    assert_eq!(ft.var_name(root.var), "A");

    let compressed = ddt.compress();
    assert_eq!(compressed.failure_probability(), ddt.failure_probability());
    assert_close(compressed.failure_probability(), 0.154, "compressed failure probability");
}

// --- randomized duality ------------------------------------------------------

/// Splitmix-style deterministic generator; no external crates needed for a
/// handful of small shapes.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

enum Shape {
    Leaf(f64),
    Gate(GateKind, Vec<Shape>),
}

fn random_shape(rng: &mut Rng, depth: usize) -> Shape {
    if depth == 0 {
        return Shape::Leaf((rng.below(99) + 1) as f64 / 100.0);
    }
    let kind = if rng.below(2) == 0 { GateKind::And } else { GateKind::Or };
    let arity = 2 + rng.below(2) as usize;
    let children = (0..arity)
        .map(|_| {
            if rng.below(2) == 0 {
                Shape::Leaf((rng.below(99) + 1) as f64 / 100.0)
            } else {
                random_shape(rng, depth - 1)
            }
        })
        .collect();
    Shape::Gate(kind, children)
}

/// Materializes a shape, optionally with every gate dualized.
fn materialize(shape: &Shape, dualize: bool) -> FaultTree {
    fn walk(
        ft: &mut FaultTree,
        shape: &Shape,
        dualize: bool,
        counter: &mut usize,
    ) -> ddt_rs::types::NodeId {
        *counter += 1;
        let name = format!("n{counter}");
        match shape {
            Shape::Leaf(prob) => ft.basic_event(&name, *prob, 1.0).unwrap(),
            Shape::Gate(kind, children) => {
                let ids: Vec<_> =
                    children.iter().map(|c| walk(ft, c, dualize, counter)).collect();
                let kind = if dualize { kind.dual() } else { *kind };
                ft.gate(kind, &name, ids).unwrap()
            }
        }
    }

    let mut ft = FaultTree::new();
    let mut counter = 0;
    let root = walk(&mut ft, shape, dualize, &mut counter);
    ft.set_root(root);
    ft
}

#[test]
fn path_sets_are_cut_sets_of_the_dual() {
    for seed in 0..20 {
        let mut rng = Rng(0x9E3779B97F4A7C15 ^ seed);
        let shape = random_shape(&mut rng, 2);
        let ft = materialize(&shape, false);
        let dual = materialize(&shape, true);

        assert_eq!(ft.path_sets().unwrap(), dual.cut_sets().unwrap(), "seed {seed}");
        assert_eq!(ft.cut_sets().unwrap(), dual.path_sets().unwrap(), "seed {seed}");
    }
}

#[test]
fn heuristics_conserve_probability_on_random_trees() {
    for seed in 0..10 {
        let mut rng = Rng(0xDEADBEEF ^ seed);
        let shape = random_shape(&mut rng, 2);
        let ft = materialize(&shape, false);
        let u = ft.unreliability().unwrap();
        for (name, ddt) in [
            ("BUDA", buda(&ft).unwrap()),
            ("BUDAcost", buda_cost(&ft).unwrap()),
            ("CuDAprob", cuda_prob(&ft).unwrap()),
            ("CuDAsize", cuda_size(&ft).unwrap()),
            ("CuDAcost", cuda_cost(&ft).unwrap()),
            ("PaDAprob", pada_prob(&ft).unwrap()),
            ("PaDAsize", pada_size(&ft).unwrap()),
            ("PaDAcost", pada_cost(&ft).unwrap()),
        ] {
            assert_close(ddt.failure_probability(), u, &format!("seed {seed}, {name}"));
        }
    }
}
