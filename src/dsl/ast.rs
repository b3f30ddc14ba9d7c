//! Abstract Syntax Tree types for problem files.

use crate::error::{Result, SylvesterError};
use crate::matrix::Array;
use crate::solver::SolverConfig;

/// Operand names in the order the solver takes them.
pub const OPERAND_NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Complete AST representation of a parsed problem file.
#[derive(Debug, Clone, Default)]
pub struct ProblemAst {
    /// Operand assignments, in file order
    pub assignments: Vec<Assignment>,
    /// Value of the `.tolerance` directive
    pub tolerance: Option<f64>,
}

/// `<name> = <value>`
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Canonical (upper-case) operand name
    pub name: String,
    /// The raw value, not yet shape-checked
    pub value: Array,
    /// Source line number for error reporting
    pub line: usize,
}

impl ProblemAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an operand by name.
    pub fn operand(&self, name: &str) -> Option<&Array> {
        self.assignments
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| &a.value)
    }

    /// The five operands A, B, C, D, E in solver order.
    pub fn operands(&self) -> Result<[Array; 5]> {
        let get = |name: &str| {
            self.operand(name)
                .cloned()
                .ok_or_else(|| SylvesterError::MissingOperand {
                    name: name.to_string(),
                })
        };
        Ok([get("A")?, get("B")?, get("C")?, get("D")?, get("E")?])
    }

    /// Solver configuration from the file's directives.
    pub fn config(&self) -> SolverConfig {
        self.config_with_tolerance(None)
    }

    /// Solver configuration where an explicit `tolerance` (e.g. from the
    /// command line) takes precedence over `.tolerance`.
    pub fn config_with_tolerance(&self, tolerance: Option<f64>) -> SolverConfig {
        let config = SolverConfig::new();
        match tolerance.or(self.tolerance) {
            Some(t) => config.with_singular_tolerance(t),
            None => config,
        }
    }
}
