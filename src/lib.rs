//! # Sylvester Core
//!
//! A direct solver for the generalized Sylvester matrix equation
//!
//! ```text
//! A·X·B + C·X·D = E
//! ```
//!
//! for the unknown X, with A, C n×n, B, D m×m and E n×m.
//!
//! This library provides:
//! - Validation and normalization of loosely shaped inputs (scalars, flat
//!   sequences, 2-D blocks) into a strongly-shaped [`Matrix`]
//! - Reduction of the equation to one dense linear system via Kronecker
//!   products, solved by LU with partial pivoting
//! - A residual evaluator for checking solutions
//! - A small text format for problem files (used by the CLI)
//!
//! ## Architecture
//!
//! - [`matrix`] - Dense matrix and raw input array types
//! - [`solver`] - LU factorization and the Sylvester solver
//! - [`residual`] - Residual matrix and Frobenius norm
//! - [`dsl`] - Problem file parser and formatter
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use sylvester_core::{residual_norm, solve, Matrix};
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0], [0.0, 1.0]]).unwrap();
//! let b = Matrix::identity(1);
//! let c = Matrix::identity(2);
//! let d = Matrix::from_rows(&[[3.0]]).unwrap();
//! let e = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
//!
//! let x = solve(&a, &b, &c, &d, &e).unwrap();
//! assert!(residual_norm(&a, &b, &c, &d, &e, &x) < 1e-12);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! sylvester problem.syl --residual
//! ```
//!
//! ## Solution Method
//!
//! With `vec` stacking columns, `vec(A·X·B) = (Bᵀ ⊗ A)·vec(X)`, so the
//! equation becomes
//!
//! 1. Build K = Bᵀ ⊗ A + Dᵀ ⊗ C, an (n·m)×(n·m) matrix
//! 2. Reject the problem if det(K) is exactly zero (or within a configured
//!    tolerance)
//! 3. Solve K·vec(X) = vec(E) and reshape vec(X) back to n×m
//!
//! The solve is one-shot with no iterative refinement, and its accuracy is
//! governed by the conditioning of K.

pub mod dsl;
pub mod error;
pub mod matrix;
pub mod residual;
pub mod solver;

// Re-export main types for convenience
pub use error::{Result, SylvesterError};
pub use matrix::{Array, Element, Matrix};
pub use residual::{residual, residual_norm};
pub use solver::{solve, solve_with_config, Problem, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
