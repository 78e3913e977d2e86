//! Pipeline configuration documents.

use crate::errors::{DataflowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single operation as written in the configuration.
///
/// Both fields are kept as text; they are resolved when the pipeline is
/// built so errors can name the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
    /// The operator: FILTER, MAP, CHANGEKEY or REDUCE.
    pub operator: String,
    /// The function expression, e.g. `ADD(1)` or `SUM`.
    pub function: String,
}

impl OperationSpec {
    /// Creates a new operation specification.
    #[must_use]
    pub fn new(operator: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            function: function.into(),
        }
    }
}

/// An ordered list of operations, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Default number of partitions to process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<usize>,
    /// The operations, applied in order.
    pub operations: Vec<OperationSpec>,
}

impl PipelineConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation.
    #[must_use]
    pub fn with_operation(mut self, operator: impl Into<String>, function: impl Into<String>) -> Self {
        self.operations.push(OperationSpec::new(operator, function));
        self
    }

    /// Sets the default partition count.
    #[must_use]
    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = Some(partitions);
        self
    }

    /// Parses a configuration from JSON text.
    ///
    /// `source` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`DataflowError::InvalidConfig`] if the text is not a valid
    /// configuration document.
    pub fn from_json(text: &str, source: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DataflowError::InvalidConfig {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DataflowError::MissingInput`] if the file does not exist
    /// and [`DataflowError::InvalidConfig`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataflowError::missing_input(path),
            _ => DataflowError::Io(e),
        })?;
        Self::from_json(&text, path)
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if there are no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
