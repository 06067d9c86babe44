//! Type-safe wrappers for fault-tree variables and vertices.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between basic-event variables (interned names) and vertex ids (positions in
//! the fault-tree arena), preventing common mix-ups in synthesis code.

use std::collections::HashMap;
use std::fmt;

/// An interned basic-event variable (0-indexed).
///
/// Variables identify the distinct basic events of a fault tree. All set
/// algebra (cut sets, path sets, restriction) runs on `Var` ids rather than
/// names; the owning [`VarTable`] resolves an id back to its name.
///
/// # Invariants
///
/// - A `Var` is only meaningful together with the table that interned it.
/// - Ids are dense: a table with `n` variables uses ids `0..n`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a variable with the given interned id.
    pub fn new(id: u32) -> Self {
        Var(id)
    }

    /// Returns the raw interned id as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Returns the id as a `usize`, for direct indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A vertex id in the fault-tree arena (0-indexed).
///
/// Unlike [`Var`], a `NodeId` can refer to any vertex: gates as well as basic
/// events. Vertex ids are assigned in insertion order and never move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a vertex id with the given index.
    pub fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The kind of an internal fault-tree gate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    /// Fails only if *all* children fail.
    And,
    /// Fails once *some* child fails.
    Or,
}

impl GateKind {
    /// Returns the dual gate kind (AND ⇄ OR).
    pub fn dual(self) -> Self {
        match self {
            GateKind::And => GateKind::Or,
            GateKind::Or => GateKind::And,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::And => write!(f, "AND"),
            GateKind::Or => write!(f, "OR"),
        }
    }
}

/// Interning table mapping basic-event names to dense [`Var`] ids.
#[derive(Debug, Clone, Default)]
pub struct VarTable {
    names: Vec<String>,
    index: HashMap<String, Var>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its id. Repeated calls with the same name
    /// return the same id.
    pub fn intern(&mut self, name: &str) -> Var {
        if let Some(&var) = self.index.get(name) {
            return var;
        }
        let var = Var::new(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), var);
        var
    }

    /// Looks up an already-interned name.
    pub fn get(&self, name: &str) -> Option<Var> {
        self.index.get(name).copied()
    }

    /// Resolves an id back to its name.
    pub fn name(&self, var: Var) -> &str {
        &self.names[var.index()]
    }

    /// Number of interned variables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over all interned variables in id order.
    pub fn iter(&self) -> impl Iterator<Item = Var> + '_ {
        (0..self.names.len() as u32).map(Var::new)
    }
}
