//! LU decomposition with partial pivoting.

use crate::error::{Result, SylvesterError};
use crate::matrix::Matrix;

/// LU factors of a square matrix, `P·A = L·U`.
///
/// L (unit lower) and U share one row-major buffer. A pivot column whose
/// largest magnitude is exactly zero stops the factorization and marks it
/// singular; no epsilon is applied.
#[derive(Debug)]
pub struct LuDecomposition {
    /// Packed L and U factors (row-major)
    lu: Vec<f64>,
    /// Row permutation: row i of P·A is row `pivots[i]` of A
    pivots: Vec<usize>,
    /// Matrix dimension
    size: usize,
    /// Number of row swaps performed
    swaps: usize,
    /// Whether an exactly-zero pivot column was found
    singular: bool,
}

impl LuDecomposition {
    /// Factor a square matrix.
    pub fn factor(matrix: &Matrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(SylvesterError::shape(
                "K",
                format!("cannot factor a {}x{} matrix", matrix.rows(), matrix.cols()),
            ));
        }

        let n = matrix.rows();
        let mut lu = matrix.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut swaps = 0;
        let mut singular = false;

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val == 0.0 {
                singular = true;
                break;
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                swaps += 1;
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(Self {
            lu,
            pivots,
            size: n,
            swaps,
            singular,
        })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a zero pivot column was encountered.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Determinant of the factored matrix.
    ///
    /// Exactly `0.0` when the factorization is singular. The product of
    /// pivots may also underflow to zero for badly scaled matrices.
    pub fn determinant(&self) -> f64 {
        if self.singular {
            return 0.0;
        }
        let n = self.size;
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        (0..n).fold(sign, |det, i| det * self.lu[i * n + i])
    }

    /// Solve `A·x = rhs` with the stored factors.
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>> {
        let n = self.size;
        if self.singular {
            return Err(SylvesterError::Singular {
                determinant: 0.0,
                tolerance: 0.0,
            });
        }
        if rhs.len() != n {
            return Err(SylvesterError::consistency(format!(
                "right-hand side has {} entries, system has {} unknowns",
                rhs.len(),
                n
            )));
        }

        // Apply pivot permutation
        let mut x: Vec<f64> = self.pivots.iter().map(|&p| rhs[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        Ok(x)
    }
}
