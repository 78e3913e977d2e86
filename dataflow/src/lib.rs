//! # Dataflow
//!
//! A reference interpreter for key/value dataflow programs.
//!
//! A program is an ordered list of operations over a table of integer
//! `(key, value)` records:
//!
//! - **FILTER** keeps records whose value satisfies a predicate
//! - **MAP** rewrites values with integer arithmetic
//! - **CHANGEKEY** derives a new key from each value
//! - **REDUCE** groups by key and aggregates
//!
//! The input is the concatenation of numbered partition files. The crate
//! also carries the harness used to verify an external engine: partition
//! generation, reference result computation and order-insensitive result
//! validation.
//!
//! ## Quick Start
//!
//! ```rust
//! use dataflow::prelude::*;
//!
//! let pipeline = PipelineBuilder::new("example")
//!     .operation("FILTER", "IS_EVEN")
//!     .operation("MAP", "ADD(1)")
//!     .build()?;
//!
//! let output = pipeline.run(RecordTable::from_pairs(&[(1, 4), (1, 7), (2, 10)]));
//! assert_eq!(output.to_pairs(), vec![(1, 5), (2, 11)]);
//! # Ok::<(), dataflow::errors::DataflowError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod core;
pub mod errors;
pub mod events;
pub mod expression;
pub mod harness;
pub mod io;
pub mod observability;
pub mod operators;
pub mod pipeline;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{OperatorKind, Record, RecordTable, TruncationPolicy};
    pub use crate::errors::DataflowError;
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::expression::FunctionExpr;
    pub use crate::harness::{ApplyOutcome, HarnessConfig, Validation};
    pub use crate::io::PartitionSource;
    pub use crate::operators::Transform;
    pub use crate::pipeline::{OperationSpec, Pipeline, PipelineBuilder, PipelineConfig, RunReport};
}
