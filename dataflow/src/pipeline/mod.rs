//! Pipeline building and execution.
//!
//! This module provides:
//! - Pipeline configuration documents
//! - A builder that resolves every operation before the run starts
//! - The executor that folds the operations over a record table
//! - Run reports

mod builder;
mod executor;
mod report;
mod spec;

pub use builder::PipelineBuilder;
pub use executor::{run, CompiledOperation, Pipeline};
pub use report::RunReport;
pub use spec::{OperationSpec, PipelineConfig};
