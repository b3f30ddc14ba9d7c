//! Error types for the generalized Sylvester solver.
//!
//! This module provides a unified error type [`SylvesterError`] that covers
//! input validation, solving, and the problem-file frontend.

use thiserror::Error;

/// Result type alias using [`SylvesterError`].
pub type Result<T> = std::result::Result<T, SylvesterError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum SylvesterError {
    // ============ Validation Errors ============
    /// An operand that must be square is not, or has an unusable dimensionality
    #[error("Operand {operand} must be a square matrix: {message}")]
    Shape { operand: String, message: String },

    /// Operand shapes disagree with each other
    #[error("Inconsistent operand shapes: {message}")]
    Consistency { message: String },

    /// An entry is not interpretable as a number
    #[error("Operand {operand} has a non-numeric entry {text:?} at {index:?}")]
    NonNumeric {
        operand: String,
        index: Vec<usize>,
        text: String,
    },

    /// An entry is NaN or infinite
    #[error("Operand {operand} has a non-finite entry ({value}) at {index:?}")]
    NonFinite {
        operand: String,
        index: Vec<usize>,
        value: f64,
    },

    // ============ Solve Errors ============
    /// The Kronecker-sum factor is singular, so no unique solution exists
    #[error("The problem is singular and a unique solution does not exist (det = {determinant:e}, tolerance = {tolerance:e})")]
    Singular { determinant: f64, tolerance: f64 },

    /// Building the Kronecker-sum factor overflowed to a non-finite value
    #[error("Numerical overflow in the Kronecker-sum factor at [{row}, {col}] (value: {value})")]
    NumericalOverflow { row: usize, col: usize, value: f64 },

    /// The vectorized solution could not be reshaped into a matrix
    #[error("Cannot reshape {len} values into a {rows}x{cols} matrix")]
    Reshape { rows: usize, cols: usize, len: usize },

    /// Invalid solver configuration
    #[error("Invalid solver configuration: {message}")]
    InvalidConfig { message: String },

    /// Array data does not match its declared shape
    #[error("Invalid array: {message}")]
    InvalidArray { message: String },

    // ============ Problem File Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Operand name outside A, B, C, D, E
    #[error("Unknown operand '{name}' at line {line} (expected one of A, B, C, D, E)")]
    UnknownOperand { name: String, line: usize },

    /// Operand assigned more than once
    #[error("Operand '{name}' assigned twice (line {line})")]
    DuplicateOperand { name: String, line: usize },

    /// Operand never assigned
    #[error("Operand '{name}' is not defined")]
    MissingOperand { name: String },

    // ============ I/O Errors ============
    /// Error reading a problem file
    #[error("Failed to read problem file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl SylvesterError {
    /// Create a shape error
    pub fn shape(operand: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            operand: operand.into(),
            message: message.into(),
        }
    }

    /// Create a consistency error
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency {
            message: message.into(),
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
