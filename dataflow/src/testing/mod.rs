//! Testing utilities for dataflow pipelines.
//!
//! This module provides:
//! - Table assertions with readable failure messages
//! - Fixtures for building tables and partition sets

mod assertions;
mod fixtures;

pub use assertions::{assert_equivalent, assert_not_equivalent, assert_rows, assert_sorted_by_key};
pub use fixtures::{keyed, PartitionFixture, TestProgram};
