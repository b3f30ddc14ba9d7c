//! Text format for describing a generalized Sylvester problem.
//!
//! Line-oriented and human-editable. Each operand is assigned once; `#`
//! starts a comment.
//!
//! # Grammar Overview
//!
//! ```text
//! problem     = { line }
//! line        = comment | directive | assignment | empty
//! comment     = '#' { any_char }
//! directive   = ".tolerance" number
//! assignment  = name '=' value
//!
//! name        = "A" | "B" | "C" | "D" | "E"      (case-insensitive)
//! value       = entry | '[' rows ']'
//! rows        = row { (';' | newline) row } [';']
//! row         = entry { [','] entry }
//! entry       = number | "nan" | ["-"] "inf" | identifier
//! ```
//!
//! A bracketed value with a single row and no `;` is a flat sequence;
//! anything else is a 2-D block. A bare entry is an unshaped scalar.
//! Identifiers other than `nan`/`inf` are kept as non-numeric entries and
//! rejected by the solver.
//!
//! # Example
//!
//! ```text
//! # A and C are 3x3, B and D are 2x2, so X is 3x2
//! A = [1 2 3; 0 2 1; 0 0 1]
//! B = [1 0; 2 1]
//! C = [2 0 0; 1 1 0; 3 2 1]
//! D = [1 2; 0 2]
//! E = [4 1; 0 0; 1 -2]
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;
use crate::matrix::Matrix;

/// Parse a problem description string into an AST.
pub fn parse(input: &str) -> Result<ProblemAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a problem file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<ProblemAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::SylvesterError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Render a matrix as an assignment that [`parse`] reads back as a 2-D block.
///
/// `precision` fixes the number of decimals; `None` prints the shortest
/// representation that round-trips.
pub fn format_matrix(name: &str, matrix: &Matrix, precision: Option<usize>) -> String {
    let mut out = format!("{} = [\n", name);
    for i in 0..matrix.rows() {
        out.push_str("   ");
        for j in 0..matrix.cols() {
            let v = matrix.get(i, j);
            let entry = match precision {
                Some(p) => format!("{:.*}", p, v),
                None => format!("{}", v),
            };
            out.push(' ');
            out.push_str(&entry);
        }
        out.push_str(";\n");
    }
    out.push(']');
    out
}
