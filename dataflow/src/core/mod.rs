//! Core domain model types for the dataflow interpreter.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Records and record tables
//! - The operator family enum
//! - The integer truncation policy applied by arithmetic functions

mod kind;
mod record;
mod truncation;

pub use kind::OperatorKind;
pub use record::{Key, Record, RecordTable, Value};
pub use truncation::TruncationPolicy;
