//! Loosely shaped input arrays.
//!
//! Callers may hand the solver a bare scalar, a flat sequence, or a 2-D
//! block, and entries may not even be numbers (a stray identifier in a
//! problem file). [`Array`] carries that raw form unchanged; the solver
//! normalizes it into a [`Matrix`] or rejects it.

use std::fmt;

use crate::error::{Result, SylvesterError};

use super::Matrix;

/// A single raw entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A real number (possibly NaN or infinite)
    Number(f64),
    /// Anything that is not a number
    Symbol(String),
}

impl Element {
    /// The numeric value, if this entry is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Element::Number(v) => Some(*v),
            Element::Symbol(_) => None,
        }
    }
}

impl From<f64> for Element {
    fn from(v: f64) -> Self {
        Element::Number(v)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Symbol(s.to_string())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Symbol(s)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Number(v) => write!(f, "{}", v),
            Element::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// An n-dimensional array of raw entries, stored row-major.
///
/// The shape is `[]` for an unshaped scalar, `[k]` for a flat sequence and
/// `[rows, cols]` for a 2-D block.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    data: Vec<Element>,
}

impl Array {
    /// Create an array, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: Vec<Element>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| SylvesterError::InvalidArray {
                message: format!("shape {:?} has too many entries", shape),
            })?;
        if expected != data.len() {
            return Err(SylvesterError::InvalidArray {
                message: format!(
                    "shape {:?} needs {} entries, got {}",
                    shape,
                    expected,
                    data.len()
                ),
            });
        }
        Ok(Self { shape, data })
    }

    /// An unshaped scalar.
    pub fn scalar(value: impl Into<Element>) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value.into()],
        }
    }

    /// A flat (1-D) sequence.
    pub fn flat<T: Into<Element>>(values: Vec<T>) -> Self {
        let data: Vec<Element> = values.into_iter().map(Into::into).collect();
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// A 2-D block built from rows. Rows must all have the same length.
    pub fn from_rows<T: Into<Element>>(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(SylvesterError::InvalidArray {
                    message: format!("row {} has {} entries, expected {}", i, row.len(), cols),
                });
            }
            data.extend(row.into_iter().map(Into::into));
        }
        Ok(Self {
            shape: vec![n_rows, cols],
            data,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions (0 for a scalar).
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major entries.
    pub fn elements(&self) -> &[Element] {
        &self.data
    }
}

impl From<f64> for Array {
    fn from(v: f64) -> Self {
        Array::scalar(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(values: Vec<f64>) -> Self {
        Array::flat(values)
    }
}

impl<const N: usize> From<[f64; N]> for Array {
    fn from(values: [f64; N]) -> Self {
        Array::flat(values.to_vec())
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Array {
    fn from(rows: [[f64; C]; R]) -> Self {
        Self {
            shape: vec![R, C],
            data: rows.iter().flatten().map(|&v| Element::Number(v)).collect(),
        }
    }
}

impl From<&Matrix> for Array {
    fn from(m: &Matrix) -> Self {
        Self {
            shape: vec![m.rows(), m.cols()],
            data: m.as_slice().iter().map(|&v| Element::Number(v)).collect(),
        }
    }
}

impl From<Matrix> for Array {
    fn from(m: Matrix) -> Self {
        Array::from(&m)
    }
}

impl From<&Array> for Array {
    fn from(a: &Array) -> Self {
        a.clone()
    }
}
