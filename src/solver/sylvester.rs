//! Generalized Sylvester equation `A·X·B + C·X·D = E`.
//!
//! The equation is linear in X. Using `vec(A·X·B) = (Bᵀ ⊗ A)·vec(X)` on both
//! terms gives one dense linear system
//!
//! ```text
//! (Bᵀ ⊗ A + Dᵀ ⊗ C) · vec(X) = vec(E)
//! ```
//!
//! in the n·m unknowns of X, where `vec` stacks columns. The Kronecker-sum
//! factor K is (n·m)×(n·m); forming and factoring it dominates the cost, and
//! its conditioning bounds the achievable accuracy.

use crate::error::{Result, SylvesterError};
use crate::matrix::{Array, Element, Matrix};

use super::lu::LuDecomposition;
use super::DEFAULT_SINGULAR_TOLERANCE;

const OPERANDS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// The problem is singular when `|det(K)| <= singular_tolerance`.
    pub singular_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the determinant tolerance for the singularity test.
    ///
    /// The default of `0.0` rejects only an exactly zero determinant, which
    /// lets numerically near-singular problems through. A positive value
    /// also rejects any K with `|det(K)|` at or below it.
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.singular_tolerance.is_finite() || self.singular_tolerance < 0.0 {
            return Err(SylvesterError::InvalidConfig {
                message: format!(
                    "singular tolerance must be finite and non-negative, got {}",
                    self.singular_tolerance
                ),
            });
        }
        Ok(())
    }
}

/// A validated generalized Sylvester problem.
///
/// A, C are n×n, B, D are m×m and E is n×m, all entries finite.
#[derive(Debug, Clone)]
pub struct Problem {
    a: Matrix,
    b: Matrix,
    c: Matrix,
    d: Matrix,
    e: Matrix,
}

impl Problem {
    /// Validate and normalize the five operands.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// squareness of A, B, C, D (a scalar or single-entry sequence counts as
    /// 1×1), shape(A) == shape(C) and shape(B) == shape(D), shape of E
    /// against (n, m) (a flat E of n·m entries is laid out row by row),
    /// non-numeric entries anywhere, then non-finite entries anywhere.
    pub fn new(
        a: impl Into<Array>,
        b: impl Into<Array>,
        c: impl Into<Array>,
        d: impl Into<Array>,
        e: impl Into<Array>,
    ) -> Result<Self> {
        let arrays: [Array; 5] = [a.into(), b.into(), c.into(), d.into(), e.into()];

        let mut sizes = [0usize; 4];
        for (i, array) in arrays[..4].iter().enumerate() {
            sizes[i] = square_size(OPERANDS[i], array)?;
        }
        let [n, m, nc, md] = sizes;

        if n != nc || m != md {
            return Err(SylvesterError::consistency(format!(
                "A and C must be the same shape, and B and D must be the same shape \
                 (A is {n}x{n}, C is {nc}x{nc}, B is {m}x{m}, D is {md}x{md})"
            )));
        }

        check_rhs_shape(&arrays[4], n, m)?;

        for (name, array) in OPERANDS.iter().zip(&arrays) {
            check_numeric(name, array)?;
        }

        Ok(Self {
            a: to_finite_matrix("A", &arrays[0], n, n)?,
            b: to_finite_matrix("B", &arrays[1], m, m)?,
            c: to_finite_matrix("C", &arrays[2], n, n)?,
            d: to_finite_matrix("D", &arrays[3], m, m)?,
            e: to_finite_matrix("E", &arrays[4], n, m)?,
        })
    }

    /// Rows of A (and of X).
    pub fn n(&self) -> usize {
        self.a.rows()
    }

    /// Rows of B (columns of X).
    pub fn m(&self) -> usize {
        self.b.rows()
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn c(&self) -> &Matrix {
        &self.c
    }

    pub fn d(&self) -> &Matrix {
        &self.d
    }

    pub fn e(&self) -> &Matrix {
        &self.e
    }

    /// Build `K = Bᵀ ⊗ A + Dᵀ ⊗ C`, an (n·m)×(n·m) matrix.
    pub fn kronecker_factor(&self) -> Matrix {
        let mut k = self.b.transpose().kron(&self.a);
        k += &self.d.transpose().kron(&self.c);
        k
    }

    /// `det(K)`, for callers that want their own near-singularity test.
    pub fn determinant(&self) -> Result<f64> {
        let k = self.finite_kronecker_factor()?;
        Ok(LuDecomposition::factor(&k)?.determinant())
    }

    /// K, rejecting entries whose products overflowed.
    fn finite_kronecker_factor(&self) -> Result<Matrix> {
        let k = self.kronecker_factor();
        let cols = k.cols();
        if let Some(i) = k.as_slice().iter().position(|v| !v.is_finite()) {
            return Err(SylvesterError::NumericalOverflow {
                row: i / cols,
                col: i % cols,
                value: k.as_slice()[i],
            });
        }
        Ok(k)
    }

    /// Solve for X.
    pub fn solve(&self, config: &SolverConfig) -> Result<Matrix> {
        config.validate()?;

        let (n, m) = (self.n(), self.m());
        let k = self.finite_kronecker_factor()?;
        let lu = LuDecomposition::factor(&k)?;

        let det = lu.determinant();
        if lu.is_singular() || det.abs() <= config.singular_tolerance {
            return Err(SylvesterError::Singular {
                determinant: det,
                tolerance: config.singular_tolerance,
            });
        }

        let vec_x = lu.solve(&self.e.to_column_vec())?;
        Matrix::from_column_vec(n, m, &vec_x)
    }
}

/// Solve `A·X·B + C·X·D = E` for X with the default configuration.
///
/// Singularity is an exact test: only `det(K) == 0` is rejected. Use
/// [`solve_with_config`] for a tolerance.
///
/// # Example
/// ```
/// use sylvester_core::solve;
///
/// let x = solve([[1.0]], [[1.0]], [[1.0]], [[1.0]], [[4.0]]).unwrap();
/// assert_eq!(x.get(0, 0), 2.0);
/// ```
pub fn solve(
    a: impl Into<Array>,
    b: impl Into<Array>,
    c: impl Into<Array>,
    d: impl Into<Array>,
    e: impl Into<Array>,
) -> Result<Matrix> {
    solve_with_config(a, b, c, d, e, &SolverConfig::default())
}

/// Solve `A·X·B + C·X·D = E` for X with a custom configuration.
pub fn solve_with_config(
    a: impl Into<Array>,
    b: impl Into<Array>,
    c: impl Into<Array>,
    d: impl Into<Array>,
    e: impl Into<Array>,
    config: &SolverConfig,
) -> Result<Matrix> {
    config.validate()?;
    Problem::new(a, b, c, d, e)?.solve(config)
}

/// Side length of a square operand.
fn square_size(name: &str, array: &Array) -> Result<usize> {
    const MESSAGE: &str = "expected a scalar, a single-entry sequence, or a 2-D array with rows == cols";

    match array.shape() {
        [] => Ok(1),
        [1] => Ok(1),
        [0] => Err(SylvesterError::shape(name, "operand is empty")),
        [len] => Err(SylvesterError::shape(
            name,
            format!("{MESSAGE}, got a flat sequence of {len} entries"),
        )),
        [0, 0] => Err(SylvesterError::shape(name, "operand is empty")),
        [rows, cols] if rows == cols => Ok(*rows),
        [rows, cols] => Err(SylvesterError::shape(
            name,
            format!("{MESSAGE}, got {rows}x{cols}"),
        )),
        shape => Err(SylvesterError::shape(
            name,
            format!("{MESSAGE}, got {} dimensions {:?}", shape.len(), shape),
        )),
    }
}

fn check_rhs_shape(e: &Array, n: usize, m: usize) -> Result<()> {
    match e.shape() {
        [len] if *len == n * m => Ok(()),
        [len] => Err(SylvesterError::consistency(format!(
            "E has {len} entries, expected {} to form a {n}x{m} matrix",
            n * m
        ))),
        [rows, cols] if (*rows, *cols) == (n, m) => Ok(()),
        [rows, cols] => Err(SylvesterError::consistency(format!(
            "E is {rows}x{cols}, expected {n}x{m}"
        ))),
        shape => Err(SylvesterError::consistency(format!(
            "E must be a flat sequence or a 2-D array, got shape {:?}",
            shape
        ))),
    }
}

fn check_numeric(name: &str, array: &Array) -> Result<()> {
    for (i, element) in array.elements().iter().enumerate() {
        if let Element::Symbol(text) = element {
            return Err(SylvesterError::NonNumeric {
                operand: name.to_string(),
                index: index_of(array, i),
                text: text.clone(),
            });
        }
    }
    Ok(())
}

/// Lay the entries out as a rows×cols matrix, rejecting NaN and infinities.
fn to_finite_matrix(name: &str, array: &Array, rows: usize, cols: usize) -> Result<Matrix> {
    let mut data = Vec::with_capacity(array.len());
    for (i, element) in array.elements().iter().enumerate() {
        let value = match element {
            Element::Number(v) => *v,
            Element::Symbol(text) => {
                return Err(SylvesterError::NonNumeric {
                    operand: name.to_string(),
                    index: index_of(array, i),
                    text: text.clone(),
                })
            }
        };
        if !value.is_finite() {
            return Err(SylvesterError::NonFinite {
                operand: name.to_string(),
                index: index_of(array, i),
                value,
            });
        }
        data.push(value);
    }
    Matrix::from_row_major(rows, cols, data)
}

/// Multi-index of the `flat`-th entry in the array's own shape.
fn index_of(array: &Array, flat: usize) -> Vec<usize> {
    let mut index = vec![0; array.ndim()];
    let mut rest = flat;
    for (slot, &dim) in index.iter_mut().zip(array.shape()).rev() {
        *slot = rest % dim;
        rest /= dim;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residual::{residual, residual_norm};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    /// Matrix with entries in [-scale, scale) plus `diagonal` on the diagonal.
    fn matrix_strategy(
        rows: usize,
        cols: usize,
        scale: f64,
        diagonal: f64,
    ) -> impl Strategy<Value = Matrix> {
        prop::collection::vec(-scale..scale, rows * cols).prop_map(move |data| {
            let mut m = Matrix::from_row_major(rows, cols, data).unwrap();
            for i in 0..rows.min(cols) {
                m.add_at(i, i, diagonal);
            }
            m
        })
    }

    /// Well-conditioned problems: A, B strongly diagonal, C, D small.
    fn problem_strategy(scale_e: f64) -> impl Strategy<Value = [Matrix; 5]> {
        (1usize..5, 1usize..4).prop_flat_map(move |(n, m)| {
            (
                matrix_strategy(n, n, 5.0, 50.0),
                matrix_strategy(m, m, 5.0, 50.0),
                matrix_strategy(n, n, 1.0, 0.0),
                matrix_strategy(m, m, 1.0, 0.0),
                matrix_strategy(n, m, scale_e, 0.0),
            )
                .prop_map(|(a, b, c, d, e)| [a, b, c, d, e])
        })
    }

    fn readme_problem() -> [Matrix; 5] {
        [
            Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 2.0, 1.0], [0.0, 0.0, 1.0]]).unwrap(),
            Matrix::from_rows(&[[1.0, 0.0], [2.0, 1.0]]).unwrap(),
            Matrix::from_rows(&[[2.0, 0.0, 0.0], [1.0, 1.0, 0.0], [3.0, 2.0, 1.0]]).unwrap(),
            Matrix::from_rows(&[[1.0, 2.0], [0.0, 2.0]]).unwrap(),
            Matrix::from_rows(&[[4.0, 1.0], [0.0, 0.0], [1.0, -2.0]]).unwrap(),
        ]
    }

    #[test]
    fn test_scalar_case() {
        let x = solve([[1.0]], [[1.0]], [[1.0]], [[1.0]], [[4.0]]).unwrap();
        assert_eq!(x.shape(), (1, 1));
        assert_eq!(x.get(0, 0), 2.0);
    }

    #[test]
    fn test_bare_scalars_are_coerced() {
        let x = solve(2.0, 3.0, 1.0, 0.0, [[12.0]]).unwrap();
        assert_abs_diff_eq!(x.get(0, 0), 2.0, epsilon = 1e-15);

        let x = solve(vec![2.0], vec![3.0], 1.0, 0.0, vec![12.0]).unwrap();
        assert_abs_diff_eq!(x.get(0, 0), 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_readme_problem_satisfies_equation() {
        let [a, b, c, d, e] = readme_problem();
        let x = solve(&a, &b, &c, &d, &e).unwrap();
        assert_eq!(x.shape(), (3, 2));
        assert!(residual_norm(&a, &b, &c, &d, &e, &x) < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_round_trip_residual_small([a, b, c, d, e] in problem_strategy(10.0)) {
            let x = solve(&a, &b, &c, &d, &e).unwrap();
            let r = residual(&a, &b, &c, &d, &e, &x);
            prop_assert_eq!(r.shape(), e.shape());
            prop_assert!(r.frobenius_norm() / e.frobenius_norm().max(1.0) < 1e-8);
        }

        #[test]
        fn prop_known_solution_recovered([a, b, c, d, x_true] in problem_strategy(3.0)) {
            let e = &a.matmul(&x_true).matmul(&b) + &c.matmul(&x_true).matmul(&d);
            let x = solve(&a, &b, &c, &d, &e).unwrap();
            for (got, want) in x.as_slice().iter().zip(x_true.as_slice()) {
                prop_assert!((got - want).abs() < 1e-10, "got {}, want {}", got, want);
            }
        }

        #[test]
        fn prop_repeated_solves_identical([a, b, c, d, e] in problem_strategy(10.0)) {
            let x1 = solve(&a, &b, &c, &d, &e).unwrap();
            let x2 = solve(&a, &b, &c, &d, &e).unwrap();
            prop_assert_eq!(x1, x2);
        }
    }

    #[test]
    fn test_non_square_rejected_first() {
        // E is also inconsistent and C contains NaN, but shape wins.
        let a = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let err = solve(a, [[1.0]], [[f64::NAN]], [[1.0]], vec![1.0]).unwrap_err();
        match err {
            SylvesterError::Shape { operand, .. } => assert_eq!(operand, "A"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_flat_square_operand_rejected() {
        let err = solve([[1.0]], vec![1.0, 2.0, 3.0, 4.0], [[1.0]], [[1.0]], [[1.0]]).unwrap_err();
        assert!(matches!(err, SylvesterError::Shape { ref operand, .. } if operand == "B"));
    }

    #[test]
    fn test_higher_dimensional_operand_rejected() {
        let cube = Array::new(vec![1, 1, 1], vec![Element::Number(1.0)]).unwrap();
        let err = solve(1.0, 1.0, cube, 1.0, [[1.0]]).unwrap_err();
        assert!(matches!(err, SylvesterError::Shape { ref operand, .. } if operand == "C"));
    }

    #[test]
    fn test_empty_operand_rejected() {
        let empty = Array::new(vec![0, 0], Vec::new()).unwrap();
        let err = solve(empty, 1.0, 1.0, 1.0, [[1.0]]).unwrap_err();
        assert!(matches!(err, SylvesterError::Shape { .. }));
    }

    #[test]
    fn test_cross_consistency_rejected() {
        let err = solve(
            [[1.0, 0.0], [0.0, 1.0]],
            [[1.0]],
            [[1.0]],
            [[1.0]],
            [[1.0], [1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));

        let err = solve([[1.0]], [[1.0]], [[1.0]], [[1.0, 0.0], [0.0, 1.0]], [[1.0]]).unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));
    }

    #[test]
    fn test_flat_rhs_is_reshaped_row_major() {
        let i2 = [[1.0, 0.0], [0.0, 1.0]];
        // 2X = E with E = [[1, 2], [3, 4]]
        let x = solve(i2, i2, i2, i2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(x.as_slice(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_flat_rhs_wrong_length_rejected() {
        let i2 = [[1.0, 0.0], [0.0, 1.0]];
        let err = solve(i2, i2, i2, i2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));
    }

    #[test]
    fn test_rhs_block_wrong_shape_rejected() {
        let err = solve(
            [[1.0, 0.0], [0.0, 1.0]],
            1.0,
            [[1.0, 0.0], [0.0, 1.0]],
            1.0,
            [[1.0, 2.0]],
        )
        .unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));

        let err = solve(1.0, 1.0, 1.0, 1.0, 4.0).unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));
    }

    #[test]
    fn test_non_finite_rejected_in_every_operand() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for slot in 0..5 {
                let mut ops = [[[1.0]]; 5];
                ops[slot] = [[bad]];
                let err = solve(ops[0], ops[1], ops[2], ops[3], ops[4]).unwrap_err();
                match err {
                    SylvesterError::NonFinite { operand, index, .. } => {
                        assert_eq!(operand, OPERANDS[slot]);
                        assert_eq!(index, vec![0, 0]);
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_non_finite_reported_after_shape_checks() {
        let err = solve([[f64::NAN]], [[1.0]], [[1.0, 0.0], [0.0, 1.0]], [[1.0]], [[1.0]]).unwrap_err();
        assert!(matches!(err, SylvesterError::Consistency { .. }));
    }

    #[test]
    fn test_non_numeric_distinct_from_non_finite() {
        let e = Array::from_rows(vec![
            vec![Element::from(1.0), Element::from("x")],
        ])
        .unwrap();
        // D holds an infinity, but the symbol in E is reported first.
        let err = solve(1.0, [[1.0, 0.0], [0.0, 1.0]], 1.0, [[f64::INFINITY, 0.0], [0.0, 1.0]], e)
            .unwrap_err();
        match err {
            SylvesterError::NonNumeric {
                operand,
                index,
                text,
            } => {
                assert_eq!(operand, "E");
                assert_eq!(index, vec![0, 1]);
                assert_eq!(text, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_singular_problem_rejected() {
        // A = C and B = -D cancel exactly, so K = 0.
        let a = [[1.0, 2.0], [3.0, 4.0]];
        let b = [[2.0, 1.0], [0.5, 3.0]];
        let d = [[-2.0, -1.0], [-0.5, -3.0]];
        let err = solve(a, b, a, d, [[1.0, 1.0], [1.0, 1.0]]).unwrap_err();
        match err {
            SylvesterError::Singular { determinant, .. } => assert_eq!(determinant, 0.0),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rank_deficient_factor_rejected() {
        let a = [[1.0, 2.0], [2.0, 4.0]];
        let zero = [[0.0, 0.0], [0.0, 0.0]];
        let i2 = [[1.0, 0.0], [0.0, 1.0]];
        let err = solve(a, i2, zero, i2, i2).unwrap_err();
        assert!(matches!(err, SylvesterError::Singular { .. }));
    }

    #[test]
    fn test_singular_tolerance_extension() {
        let config = SolverConfig::new().with_singular_tolerance(1e-6);
        // K = [[1e-9]]: accepted by the exact test, rejected with a tolerance.
        assert!(solve(1e-9, 1.0, 0.0, 0.0, [[1.0]]).is_ok());
        let err = solve_with_config(1e-9, 1.0, 0.0, 0.0, [[1.0]], &config).unwrap_err();
        assert!(matches!(err, SylvesterError::Singular { .. }));
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        for tolerance in [-1.0, f64::NAN, f64::INFINITY] {
            let config = SolverConfig::new().with_singular_tolerance(tolerance);
            let err = solve_with_config(1.0, 1.0, 1.0, 1.0, [[1.0]], &config).unwrap_err();
            assert!(matches!(err, SylvesterError::InvalidConfig { .. }));
        }
    }

    #[test]
    fn test_invalid_tolerance_reported_before_operand_checks() {
        let config = SolverConfig::new().with_singular_tolerance(-1.0);
        let err =
            solve_with_config([[1.0, 2.0, 3.0]], 1.0, 1.0, 1.0, [[1.0]], &config).unwrap_err();
        assert!(matches!(err, SylvesterError::InvalidConfig { .. }));
    }

    #[test]
    fn test_overflowing_factor_rejected() {
        // Every operand is finite, but 1e200 * 1e200 is not.
        let big = [[1e200, 0.0], [0.0, 1e200]];
        let err = solve(big, big, big, big, [[1.0, 0.0], [0.0, 1.0]]).unwrap_err();
        match err {
            SylvesterError::NumericalOverflow { row, col, value } => {
                assert_eq!((row, col), (0, 0));
                assert_eq!(value, f64::INFINITY);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let problem = Problem::new(1e200, 1e200, 0.0, 0.0, [[1.0]]).unwrap();
        assert!(matches!(
            problem.determinant(),
            Err(SylvesterError::NumericalOverflow { .. })
        ));
    }

    #[test]
    fn test_determinant_and_factor() {
        let problem = Problem::new(2.0, 3.0, 1.0, 4.0, [[1.0]]).unwrap();
        let k = problem.kronecker_factor();
        assert_eq!(k.shape(), (1, 1));
        assert_eq!(k.get(0, 0), 10.0);
        assert_eq!(problem.determinant().unwrap(), 10.0);

        let [a, b, c, d, e] = readme_problem();
        let problem = Problem::new(&a, &b, &c, &d, &e).unwrap();
        assert_eq!(problem.kronecker_factor().shape(), (6, 6));
        assert_ne!(problem.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_inputs_untouched_and_deterministic() {
        let [a, b, c, d, e] = readme_problem();
        let before = readme_problem();
        let x1 = solve(&a, &b, &c, &d, &e).unwrap();
        let x2 = solve(&a, &b, &c, &d, &e).unwrap();
        assert_eq!(x1, x2);
        assert_eq!([a, b, c, d, e], before);
    }
}
