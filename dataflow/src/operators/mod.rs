//! The operator library.
//!
//! Four transform families operate on record tables:
//! - FILTER keeps records whose value satisfies a predicate
//! - MAP rewrites values
//! - CHANGEKEY rewrites keys from values
//! - REDUCE groups by key and aggregates
//!
//! The free functions in this module take a raw function expression, compile
//! it and apply it in one step. The pipeline compiles once up front through
//! [`Transform`] instead.

mod arithmetic;
mod filter;
mod reduce;
mod transform;

pub use arithmetic::{Arithmetic, ArithmeticOp};
pub use filter::Predicate;
pub use reduce::Aggregate;
pub use transform::Transform;

use crate::core::{OperatorKind, RecordTable, TruncationPolicy};
use crate::errors::Result;

/// Applies a FILTER function.
///
/// # Errors
///
/// Returns an error if the function is unsupported or its parameter is invalid.
pub fn filter(table: RecordTable, function: &str) -> Result<RecordTable> {
    apply(OperatorKind::Filter, table, function)
}

/// Applies a MAP function with the default truncation policy.
///
/// # Errors
///
/// Returns an error if the function is unsupported or its parameter is invalid.
pub fn map(table: RecordTable, function: &str) -> Result<RecordTable> {
    apply(OperatorKind::Map, table, function)
}

/// Applies a CHANGEKEY function with the default truncation policy.
///
/// # Errors
///
/// Returns an error if the function is unsupported or its parameter is invalid.
pub fn change_key(table: RecordTable, function: &str) -> Result<RecordTable> {
    apply(OperatorKind::ChangeKey, table, function)
}

/// Applies a REDUCE function.
///
/// # Errors
///
/// Returns an error if the function is unsupported.
pub fn reduce(table: RecordTable, function: &str) -> Result<RecordTable> {
    apply(OperatorKind::Reduce, table, function)
}

/// Compiles `function` under `kind` and applies it to `table`.
///
/// # Errors
///
/// Returns an error if the function is unsupported or its parameter is invalid.
pub fn apply(kind: OperatorKind, table: RecordTable, function: &str) -> Result<RecordTable> {
    let transform = Transform::compile(kind, function, TruncationPolicy::default())?;
    Ok(transform.apply(table))
}
