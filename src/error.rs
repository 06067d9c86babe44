//! Error types for fault-tree construction and synthesis.
//!
//! Two families: [`FtError`] covers structural violations caught while
//! building or querying a fault tree, and [`SynthesisError`] covers inputs a
//! synthesis algorithm cannot turn into a decision diagram. A failed
//! [`find_vertex_by_name`][crate::tree::FaultTree::find_vertex_by_name]
//! lookup is *not* an error: "absent" is an ordinary `None`, distinct from a
//! malformed tree.

use thiserror::Error;

/// Structural errors raised while constructing or querying a fault tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FtError {
    /// Gates must have at least one child.
    #[error("gate '{name}' has no children")]
    EmptyGate { name: String },

    /// Vertex names are unique within one tree.
    #[error("duplicate vertex name '{name}'")]
    DuplicateName { name: String },

    /// Basic-event failure probabilities live in [0, 1].
    #[error("basic event '{name}' has probability {value} outside [0, 1]")]
    InvalidProbability { name: String, value: f64 },

    /// Inspection costs are non-negative.
    #[error("basic event '{name}' has negative cost {value}")]
    NegativeCost { name: String, value: f64 },

    /// A child id handed to a gate does not exist in this tree.
    #[error("unknown child vertex {index} for gate '{name}'")]
    UnknownChild { name: String, index: usize },

    /// An operation needs a root but none was set.
    #[error("fault tree has no root")]
    NoRoot,
}

/// Errors raised by the synthesis algorithms.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthesisError {
    /// The exact search found no variable to place at a decision point.
    /// Happens only when the expression is not constant yet the remaining
    /// variable set is empty, i.e. the inputs were inconsistent.
    #[error("no candidate variable left for a non-constant expression")]
    NoCandidate,

    /// A variable occurring in the expression or a set family has no entry in
    /// the supplied probability or cost mapping.
    #[error("variable {0} is missing from the supplied mapping")]
    MissingMapping(crate::types::Var),
}
