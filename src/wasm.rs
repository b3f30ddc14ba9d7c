//! WASM bindings for Sylvester Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { solve_flat, solve_text } from 'sylvester_core';
//!
//! await init();
//!
//! // 1x1 problem: (1 + 1) X = 4
//! const x = solve_flat(1, 1, [1], [1], [1], [1], [4]); // Float64Array [2]
//!
//! const text = solve_text(`
//!   A = [1 2; 0 1]
//!   B = 1
//!   C = [1 0; 0 1]
//!   D = 3
//!   E = [1 2]
//! `);
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl;
use crate::error::{Result, SylvesterError};
use crate::matrix::{Array, Element};
use crate::solver::{solve, solve_with_config};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: SylvesterError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn block(rows: usize, cols: usize, data: &[f64]) -> Result<Array> {
    Array::new(
        vec![rows, cols],
        data.iter().map(|&v| Element::Number(v)).collect(),
    )
    .map_err(|e| SylvesterError::WasmError {
        message: e.to_string(),
    })
}

/// Solve AXB + CXD = E from row-major buffers.
///
/// # Arguments
/// * `n` - Order of A and C
/// * `m` - Order of B and D
/// * `a`, `c` - n·n entries each
/// * `b`, `d` - m·m entries each
/// * `e` - n·m entries
///
/// # Returns
/// X as n·m row-major entries, or an error message.
#[wasm_bindgen]
pub fn solve_flat(
    n: usize,
    m: usize,
    a: &[f64],
    b: &[f64],
    c: &[f64],
    d: &[f64],
    e: &[f64],
) -> std::result::Result<Vec<f64>, JsValue> {
    let x = solve(
        block(n, n, a).map_err(to_js)?,
        block(m, m, b).map_err(to_js)?,
        block(n, n, c).map_err(to_js)?,
        block(m, m, d).map_err(to_js)?,
        block(n, m, e).map_err(to_js)?,
    )
    .map_err(to_js)?;
    Ok(x.into_vec())
}

/// Solve a problem written in the problem-file format.
///
/// # Returns
/// The solution as `X = [...]` text.
#[wasm_bindgen]
pub fn solve_text(source: &str) -> std::result::Result<String, JsValue> {
    let ast = dsl::parse(source).map_err(to_js)?;
    let [a, b, c, d, e] = ast.operands().map_err(to_js)?;
    let x = solve_with_config(a, b, c, d, e, &ast.config()).map_err(to_js)?;
    Ok(dsl::format_matrix("X", &x, None))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
