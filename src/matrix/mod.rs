//! Matrix types.
//!
//! [`Matrix`] is the canonical strongly-shaped type every solver operation
//! works on. [`Array`] is the raw caller-facing form that may still need
//! shape coercion and numeric validation.

mod array;
mod dense;

pub use array::{Array, Element};
pub use dense::Matrix;
