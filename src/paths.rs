//! Iterator over root-to-terminal paths of a decision tree.
//!
//! Each yielded [`DdtPath`] is the sequence of `(variable, outcome)` steps
//! taken plus the terminal reached. The iterator backs
//! the no-repeat invariant check after
//! [compression][crate::ddt::Ddt::compress] and lets tests account for every
//! diagnosis branch explicitly.
//!
//! # Example
//!
//! ```
//! use ddt_rs::ddt::Ddt;
//! use ddt_rs::types::Var;
//!
//! let ddt = Ddt::decision(Var::new(0), 0.1, 1.0, Ddt::Zero, Ddt::One);
//! let paths: Vec<_> = ddt.paths().collect();
//! assert_eq!(paths.len(), 2);
//! ```
//!
//! # Performance
//!
//! Uses a stack-based traversal with backtracking; the step vector is shared
//! across iterations and only cloned when a path is yielded. The number of
//! paths is exponential in the diagram height.

use crate::ddt::Ddt;
use crate::types::Var;

/// The terminal a path ends in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Terminal {
    Zero,
    One,
}

impl Terminal {
    /// Whether this terminal diagnoses the system as failed. Every terminal
    /// other than Zero counts as failure.
    pub fn is_failure(self) -> bool {
        !matches!(self, Terminal::Zero)
    }
}

/// One root-to-terminal path: the tests taken, in order, and the diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct DdtPath {
    pub steps: Vec<(Var, bool)>,
    pub terminal: Terminal,
}

impl DdtPath {
    /// True iff some variable is tested more than once along this path.
    pub fn has_repeat(&self) -> bool {
        let mut vars: Vec<Var> = self.steps.iter().map(|&(v, _)| v).collect();
        vars.sort();
        vars.windows(2).any(|w| w[0] == w[1])
    }
}

/// Which branch of a decision vertex to explore next.
#[derive(Debug, Clone, Copy)]
enum Branch {
    Low,
    High,
}

/// Frame on the exploration stack.
#[derive(Debug)]
struct StackFrame<'a> {
    node: &'a Ddt,
    /// Branch to explore next; `None` once both are done.
    next_branch: Option<Branch>,
}

/// An iterator over all root-to-terminal paths. Created by [`Ddt::paths`].
pub struct DdtPaths<'a> {
    stack: Vec<StackFrame<'a>>,
    /// Current path being built (reused across iterations).
    current: Vec<(Var, bool)>,
}

impl Ddt {
    /// Returns an iterator over every root-to-terminal path.
    pub fn paths(&self) -> DdtPaths<'_> {
        DdtPaths {
            stack: vec![StackFrame { node: self, next_branch: Some(Branch::Low) }],
            current: Vec::new(),
        }
    }

    /// True iff some root-to-terminal path tests a variable twice.
    /// Always false after [`compress`][Ddt::compress].
    pub fn has_repeated_test(&self) -> bool {
        self.paths().any(|p| p.has_repeat())
    }
}

impl Iterator for DdtPaths<'_> {
    type Item = DdtPath;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;

            let d = match frame.node {
                Ddt::Zero | Ddt::One => {
                    let terminal = if matches!(frame.node, Ddt::Zero) {
                        Terminal::Zero
                    } else {
                        Terminal::One
                    };
                    let steps = self.current.clone();
                    self.stack.pop();
                    // Pop the step that led here, unless the terminal is the root.
                    if !self.stack.is_empty() {
                        self.current.pop();
                    }
                    return Some(DdtPath { steps, terminal });
                }
                Ddt::Decision(d) => d,
            };

            match frame.next_branch {
                Some(Branch::Low) => {
                    frame.next_branch = Some(Branch::High);
                    self.current.push((d.var, false));
                    self.stack.push(StackFrame { node: &d.low, next_branch: Some(Branch::Low) });
                }
                Some(Branch::High) => {
                    frame.next_branch = None;
                    self.current.push((d.var, true));
                    self.stack.push(StackFrame { node: &d.high, next_branch: Some(Branch::Low) });
                }
                None => {
                    self.stack.pop();
                    if !self.stack.is_empty() {
                        self.current.pop();
                    }
                }
            }
        }
    }
}
