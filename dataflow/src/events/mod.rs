//! Event sink system for observability.
//!
//! The pipeline executor publishes lifecycle events (`pipeline.started`,
//! `operation.completed`, ...) to an [`EventSink`]. Sinks are passed in
//! explicitly; there is no process-wide default.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Event emitted before the first operation runs.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// Event emitted after the last operation succeeded.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// Event emitted when a run is requested with zero partitions.
pub const PIPELINE_SKIPPED: &str = "pipeline.skipped";
/// Event emitted before each operation.
pub const OPERATION_STARTED: &str = "operation.started";
/// Event emitted after each successful operation.
pub const OPERATION_COMPLETED: &str = "operation.completed";
/// Event emitted when an operation fails.
pub const OPERATION_FAILED: &str = "operation.failed";
