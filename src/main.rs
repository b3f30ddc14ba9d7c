//! Sylvester - generalized Sylvester equation solver
//!
//! Solves A·X·B + C·X·D = E for X from a problem file.
//!
//! # Usage
//!
//! ```bash
//! sylvester problem.syl --residual
//! cat problem.syl | sylvester --precision 6
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use sylvester_core::{
    dsl::{self, format_matrix, ProblemAst},
    error::{Result, SylvesterError},
    residual, residual_norm, Problem,
};

/// Generalized Sylvester equation solver (AXB + CXD = E)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the problem file (reads stdin when omitted)
    #[arg(value_name = "PROBLEM_FILE")]
    problem_file: Option<PathBuf>,

    /// Determinant tolerance for the singularity test (overrides `.tolerance`)
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Decimal places to print (shortest round-trip form by default)
    #[arg(short, long)]
    precision: Option<usize>,

    /// Also print the residual AXB + CXD - E and its Frobenius norm
    #[arg(short, long)]
    residual: bool,
}

fn read_problem(path: Option<&PathBuf>) -> Result<ProblemAst> {
    match path {
        Some(path) => dsl::parse_file(path),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| SylvesterError::FileReadError {
                    path: "<stdin>".to_string(),
                    source: e,
                })?;
            dsl::parse(&content)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Parse the problem
    let ast = read_problem(args.problem_file.as_ref())?;

    let config = ast.config_with_tolerance(args.tolerance);

    // Validate and solve
    let [a, b, c, d, e] = ast.operands()?;
    let problem = Problem::new(a, b, c, d, e)?;
    let x = problem.solve(&config)?;

    println!("{}", format_matrix("X", &x, args.precision));

    if args.residual {
        let (a, b, c, d, e) = (problem.a(), problem.b(), problem.c(), problem.d(), problem.e());
        let r = residual(a, b, c, d, e, &x);
        println!("{}", format_matrix("R", &r, args.precision));
        println!("# residual_norm = {:e}", residual_norm(a, b, c, d, e, &x));
    }

    Ok(())
}
