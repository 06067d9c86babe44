//! The fault-tree model.
//!
//! A [`FaultTree`] is a manager-centric arena of named vertices: basic events
//! (leaves with a failure probability and an inspection cost) combined by
//! AND/OR gates. Trees are built bottom-up through the manager, validated at
//! insertion, and only read afterwards — the single exception is
//! [`propagate_unreliability`][FaultTree::propagate_unreliability], an
//! explicit opt-in that memoizes computed failure probabilities on gates.
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
//! let u = ft.unreliability().unwrap();
//! assert!((u - 0.154).abs() < 1e-12);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use log::trace;

use crate::error::FtError;
use crate::types::{GateKind, NodeId, Var, VarTable};

/// The payload of a fault-tree vertex.
#[derive(Debug, Clone)]
pub enum FtNodeKind {
    /// A basic event: a leaf with a failure probability and inspection cost.
    BasicEvent { var: Var, prob: f64, cost: f64 },
    /// An AND/OR gate over child vertices. `prob` is filled in by
    /// [`FaultTree::propagate_unreliability`], never automatically.
    Gate {
        kind: GateKind,
        children: Vec<NodeId>,
        prob: Option<f64>,
    },
}

/// A single fault-tree vertex.
#[derive(Debug, Clone)]
pub struct FtNode {
    pub name: String,
    pub kind: FtNodeKind,
}

/// A rooted AND/OR fault tree over basic events.
///
/// All vertices live in the manager; handles are lightweight [`NodeId`]s.
/// The root is the most recently inserted vertex unless overridden with
/// [`set_root`][FaultTree::set_root] — building bottom-up, the top event is
/// inserted last.
#[derive(Debug, Clone, Default)]
pub struct FaultTree {
    nodes: Vec<FtNode>,
    root: Option<NodeId>,
    vars: VarTable,
}

impl FaultTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_name(&self, name: &str) -> Result<(), FtError> {
        if self.nodes.iter().any(|n| n.name == name) {
            return Err(FtError::DuplicateName { name: name.to_string() });
        }
        Ok(())
    }

    fn push(&mut self, node: FtNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        trace!("insert {} '{}'", id, node.name);
        self.nodes.push(node);
        self.root = Some(id);
        id
    }

    /// Adds a basic event with the given failure probability and inspection
    /// cost.
    pub fn basic_event(&mut self, name: &str, prob: f64, cost: f64) -> Result<NodeId, FtError> {
        self.check_name(name)?;
        if !(0.0..=1.0).contains(&prob) {
            return Err(FtError::InvalidProbability { name: name.to_string(), value: prob });
        }
        if cost < 0.0 {
            return Err(FtError::NegativeCost { name: name.to_string(), value: cost });
        }
        let var = self.vars.intern(name);
        Ok(self.push(FtNode {
            name: name.to_string(),
            kind: FtNodeKind::BasicEvent { var, prob, cost },
        }))
    }

    /// Adds a gate of the given kind over already-inserted children.
    pub fn gate(
        &mut self,
        kind: GateKind,
        name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, FtError> {
        self.check_name(name)?;
        let children: Vec<NodeId> = children.into_iter().collect();
        if children.is_empty() {
            return Err(FtError::EmptyGate { name: name.to_string() });
        }
        for &child in &children {
            if child.index() >= self.nodes.len() {
                return Err(FtError::UnknownChild { name: name.to_string(), index: child.index() });
            }
        }
        Ok(self.push(FtNode {
            name: name.to_string(),
            kind: FtNodeKind::Gate { kind, children, prob: None },
        }))
    }

    /// Adds an AND gate. Shorthand for [`gate`][FaultTree::gate].
    pub fn and_gate(
        &mut self,
        name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, FtError> {
        self.gate(GateKind::And, name, children)
    }

    /// Adds an OR gate. Shorthand for [`gate`][FaultTree::gate].
    pub fn or_gate(
        &mut self,
        name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, FtError> {
        self.gate(GateKind::Or, name, children)
    }

    /// Overrides the root vertex.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Result<NodeId, FtError> {
        self.root.ok_or(FtError::NoRoot)
    }

    pub fn node(&self, id: NodeId) -> &FtNode {
        &self.nodes[id.index()]
    }

    pub fn name_of(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    /// The interning table for basic-event variables.
    pub fn var_table(&self) -> &VarTable {
        &self.vars
    }

    /// Resolves a variable back to its basic-event name.
    pub fn var_name(&self, var: Var) -> &str {
        self.vars.name(var)
    }

    /// Number of vertices (gates and basic events).
    pub fn num_vertices(&self) -> usize {
        self.nodes.len()
    }
}

// Read-only queries.
impl FaultTree {
    /// The set of all basic-event variables.
    pub fn variables(&self) -> BTreeSet<Var> {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                FtNodeKind::BasicEvent { var, .. } => Some(var),
                FtNodeKind::Gate { .. } => None,
            })
            .collect()
    }

    /// Mapping from basic-event variable to failure probability.
    pub fn probabilities(&self) -> HashMap<Var, f64> {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                FtNodeKind::BasicEvent { var, prob, .. } => Some((var, prob)),
                FtNodeKind::Gate { .. } => None,
            })
            .collect()
    }

    /// Mapping from basic-event variable to inspection cost.
    pub fn costs(&self) -> HashMap<Var, f64> {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                FtNodeKind::BasicEvent { var, cost, .. } => Some((var, cost)),
                FtNodeKind::Gate { .. } => None,
            })
            .collect()
    }

    /// Failure probability of a basic-event variable.
    pub fn prob_of(&self, var: Var) -> f64 {
        self.nodes
            .iter()
            .find_map(|n| match n.kind {
                FtNodeKind::BasicEvent { var: v, prob, .. } if v == var => Some(prob),
                _ => None,
            })
            .unwrap_or(f64::NAN)
    }

    /// Inspection cost of a basic-event variable.
    pub fn cost_of(&self, var: Var) -> f64 {
        self.nodes
            .iter()
            .find_map(|n| match n.kind {
                FtNodeKind::BasicEvent { var: v, cost, .. } if v == var => Some(cost),
                _ => None,
            })
            .unwrap_or(f64::NAN)
    }

    /// Names of all vertices reachable from the root, gates included.
    pub fn vertex_names(&self) -> Result<BTreeSet<String>, FtError> {
        let root = self.root()?;
        let mut names = BTreeSet::new();
        self.collect_names(root, &mut names);
        Ok(names)
    }

    fn collect_names(&self, id: NodeId, names: &mut BTreeSet<String>) {
        let node = self.node(id);
        names.insert(node.name.clone());
        if let FtNodeKind::Gate { ref children, .. } = node.kind {
            for &child in children {
                self.collect_names(child, names);
            }
        }
    }

    /// Depth-first search for a vertex by name, starting at the root.
    /// Returns the first match; `None` means absent (a valid outcome, not an
    /// error).
    pub fn find_vertex_by_name(&self, name: &str) -> Option<NodeId> {
        let root = self.root?;
        self.find_from(root, name)
    }

    fn find_from(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let node = self.node(id);
        if node.name == name {
            return Some(id);
        }
        if let FtNodeKind::Gate { ref children, .. } = node.kind {
            for &child in children {
                if let Some(found) = self.find_from(child, name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Height of the tree in vertices: a lone basic event has height 1.
    pub fn max_height(&self) -> Result<usize, FtError> {
        let root = self.root()?;
        Ok(self.height_of(root))
    }

    fn height_of(&self, id: NodeId) -> usize {
        match self.node(id).kind {
            FtNodeKind::BasicEvent { .. } => 1,
            FtNodeKind::Gate { ref children, .. } => {
                1 + children.iter().map(|&c| self.height_of(c)).max().unwrap_or(0)
            }
        }
    }
}

// Unreliability: leaf → own probability, AND → product, OR → 1 − Π(1 − pᵢ).
impl FaultTree {
    /// Failure probability of the whole system. Pure.
    pub fn unreliability(&self) -> Result<f64, FtError> {
        Ok(self.unreliability_of(self.root()?))
    }

    /// Failure probability of the subtree rooted at `id`. Pure.
    pub fn unreliability_of(&self, id: NodeId) -> f64 {
        match self.node(id).kind {
            FtNodeKind::BasicEvent { prob, .. } => prob,
            FtNodeKind::Gate { kind, ref children, .. } => match kind {
                GateKind::And => children.iter().map(|&c| self.unreliability_of(c)).product(),
                GateKind::Or => {
                    1.0 - children
                        .iter()
                        .map(|&c| 1.0 - self.unreliability_of(c))
                        .product::<f64>()
                }
            },
        }
    }

    /// Like [`unreliability`][FaultTree::unreliability], but also writes the
    /// computed probability onto every gate vertex. This is the only mutating
    /// operation on a constructed tree.
    pub fn propagate_unreliability(&mut self) -> Result<f64, FtError> {
        let root = self.root()?;
        Ok(self.propagate_from(root))
    }

    fn propagate_from(&mut self, id: NodeId) -> f64 {
        let (kind, children) = match self.node(id).kind {
            FtNodeKind::BasicEvent { prob, .. } => return prob,
            FtNodeKind::Gate { kind, ref children, .. } => (kind, children.clone()),
        };
        let result = match kind {
            GateKind::And => {
                let mut p = 1.0;
                for child in children {
                    p *= self.propagate_from(child);
                }
                p
            }
            GateKind::Or => {
                let mut q = 1.0;
                for child in children {
                    q *= 1.0 - self.propagate_from(child);
                }
                1.0 - q
            }
        };
        if let FtNodeKind::Gate { ref mut prob, .. } = self.nodes[id.index()].kind {
            *prob = Some(result);
        }
        result
    }
}

impl fmt::Display for FaultTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return write!(f, "(empty fault tree)");
        };
        let mut printed = HashSet::new();
        self.fmt_vertex(f, root, 0, &mut printed)
    }
}

impl FaultTree {
    fn fmt_vertex(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        indent: usize,
        printed: &mut HashSet<NodeId>,
    ) -> fmt::Result {
        let node = self.node(id);
        write!(f, "{}{}", "  ".repeat(indent), node.name)?;
        if !printed.insert(id) {
            return writeln!(f, " (shared)");
        }
        match node.kind {
            FtNodeKind::BasicEvent { prob, cost, .. } => {
                writeln!(f, " (BE, prob: {prob}, cost: {cost})")
            }
            FtNodeKind::Gate { kind, ref children, prob } => {
                match prob {
                    Some(p) => writeln!(f, " ({kind}, prob: {p})")?,
                    None => writeln!(f, " ({kind})")?,
                }
                for &child in children {
                    self.fmt_vertex(f, child, indent + 1, printed)?;
                }
                Ok(())
            }
        }
    }
}
