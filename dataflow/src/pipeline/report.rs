//! Run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique ID of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The pipeline name.
    pub pipeline: String,
    /// Number of partitions merged into the input.
    pub partitions: usize,
    /// Number of operations applied.
    pub operations: usize,
    /// Rows in the merged input.
    pub input_rows: usize,
    /// Rows in the result.
    pub output_rows: usize,
    /// Wall time of the whole run in milliseconds.
    pub duration_ms: f64,
    /// Hex SHA-256 of the serialized result.
    pub digest: String,
}

impl RunReport {
    /// Creates a report for a run starting now.
    #[must_use]
    pub fn start(pipeline: impl Into<String>, partitions: usize, operations: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            pipeline: pipeline.into(),
            partitions,
            operations,
            input_rows: 0,
            output_rows: 0,
            duration_ms: 0.0,
            digest: String::new(),
        }
    }

    /// Records the row counts.
    #[must_use]
    pub fn with_rows(mut self, input_rows: usize, output_rows: usize) -> Self {
        self.input_rows = input_rows;
        self.output_rows = output_rows;
        self
    }

    /// Records the result digest.
    #[must_use]
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = digest.into();
        self
    }

    /// Records the run duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
