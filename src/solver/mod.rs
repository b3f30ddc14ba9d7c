//! Numerical engine.
//!
//! - [`LuDecomposition`]: dense LU with partial pivoting and an exact
//!   zero-pivot singularity test
//! - [`Problem`]: validation of the five operands and the Kronecker
//!   reduction of `A·X·B + C·X·D = E` to a single linear system

mod lu;
mod sylvester;

pub use lu::LuDecomposition;
pub use sylvester::{solve, solve_with_config, Problem, SolverConfig};

/// Default determinant tolerance. Zero means only an exactly singular
/// Kronecker-sum factor is rejected.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 0.0;
