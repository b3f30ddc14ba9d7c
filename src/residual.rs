//! Residual of a candidate solution.
//!
//! Diagnostic helpers for checking `A·X·B + C·X·D = E`. They assume
//! shape-consistent, finite inputs (as produced by [`crate::Problem`]) and do
//! no validation of their own; mismatched shapes panic in [`Matrix::matmul`].

use crate::matrix::Matrix;

/// `A·X·B + C·X·D − E`, same shape as E.
pub fn residual(a: &Matrix, b: &Matrix, c: &Matrix, d: &Matrix, e: &Matrix, x: &Matrix) -> Matrix {
    let lhs = &a.matmul(x).matmul(b) + &c.matmul(x).matmul(d);
    &lhs - e
}

/// Frobenius norm of [`residual`].
pub fn residual_norm(a: &Matrix, b: &Matrix, c: &Matrix, d: &Matrix, e: &Matrix, x: &Matrix) -> f64 {
    residual(a, b, c, d, e, x).frobenius_norm()
}
