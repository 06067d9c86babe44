//! Decision-tree to DOT (Graphviz) conversion.
//!
//! Conventions follow the usual decision-diagram rendering: terminal vertices
//! are squares at the bottom, decision vertices are circles labeled with the
//! tested basic event, solid edges are high (failed) branches and dashed
//! edges are low (did not fail) branches.
//!
//! # Example
//!
//! ```
//! use ddt_rs::greedy::cuda_prob;
//! use ddt_rs::tree::FaultTree;
//!
//! let mut ft = FaultTree::new();
//! let a = ft.basic_event("A", 0.1, 1.0).unwrap();
//! let b = ft.basic_event("B", 0.2, 2.0).unwrap();
//! ft.or_gate("Top", [a, b]).unwrap();
//!
//! let ddt = cuda_prob(&ft).unwrap();
//! let dot = ddt.to_dot(ft.var_table()).unwrap();
//! // Render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("digraph"));
//! ```

use std::fmt::Write;

use crate::ddt::Ddt;
use crate::types::VarTable;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision vertices (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal vertices (default: "square")
    pub terminal_shape: &'static str,
    /// Style for high (failed) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (did not fail) edges (default: "dashed")
    pub low_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            high_edge_style: "solid",
            low_edge_style: "dashed",
        }
    }
}

impl Ddt {
    /// Converts the decision tree to DOT format with default settings.
    /// `vars` resolves tested variables back to their basic-event names.
    pub fn to_dot(&self, vars: &VarTable) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(vars, &DotConfig::default())
    }

    /// Converts the decision tree to DOT format with custom settings.
    pub fn to_dot_with_config(
        &self,
        vars: &VarTable,
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "digraph DDT {{")?;
        writeln!(out, "  rankdir=TB;")?;
        let mut counter = 0;
        self.write_vertex(&mut out, vars, config, &mut counter)?;
        writeln!(out, "}}")?;
        Ok(out)
    }

    /// Emits this vertex and its subtree; returns the vertex's DOT id.
    fn write_vertex(
        &self,
        out: &mut String,
        vars: &VarTable,
        config: &DotConfig,
        counter: &mut usize,
    ) -> Result<usize, std::fmt::Error> {
        let id = *counter;
        *counter += 1;
        match self {
            Ddt::Zero => {
                writeln!(out, "  n{id} [shape={}, label=\"0\"];", config.terminal_shape)?;
            }
            Ddt::One => {
                writeln!(out, "  n{id} [shape={}, label=\"1\"];", config.terminal_shape)?;
            }
            Ddt::Decision(d) => {
                writeln!(
                    out,
                    "  n{id} [shape={}, label=\"{}\\np={} c={}\"];",
                    config.node_shape,
                    vars.name(d.var),
                    d.prob,
                    d.cost,
                )?;
                let low_id = d.low.write_vertex(out, vars, config, counter)?;
                writeln!(out, "  n{id} -> n{low_id} [style={}, label=\"0\"];", config.low_edge_style)?;
                let high_id = d.high.write_vertex(out, vars, config, counter)?;
                writeln!(out, "  n{id} -> n{high_id} [style={}, label=\"1\"];", config.high_edge_style)?;
            }
        }
        Ok(id)
    }
}
