//! Harness configuration.

use crate::core::TruncationPolicy;
use crate::errors::{DataflowError, Result};
use crate::io::PartitionSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File locations and run settings for the harness.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Partition files live at `<partition_prefix><i>.csv`.
    #[serde(default = "default_partition_prefix")]
    pub partition_prefix: PathBuf,
    /// The pipeline configuration document.
    #[serde(default = "default_program_path")]
    pub program_path: PathBuf,
    /// Where the reference result is written.
    #[serde(default = "default_result_path")]
    pub result_path: PathBuf,
    /// The result produced by the system under test.
    #[serde(default = "default_expected_path")]
    pub expected_path: PathBuf,
    /// Division truncation policy.
    #[serde(default)]
    pub truncation: TruncationPolicy,
}

fn default_partition_prefix() -> PathBuf {
    PathBuf::from("files/program3/key")
}

fn default_program_path() -> PathBuf {
    PathBuf::from("files/program3/program.json")
}

fn default_result_path() -> PathBuf {
    PathBuf::from("files/program3/result.csv")
}

fn default_expected_path() -> PathBuf {
    PathBuf::from("result-3.csv")
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            partition_prefix: default_partition_prefix(),
            program_path: default_program_path(),
            result_path: default_result_path(),
            expected_path: default_expected_path(),
            truncation: TruncationPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Creates a configuration with default paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file; absent fields take defaults.
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
        serde_json::from_str(&text).map_err(|e| DataflowError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Places every file under `dir`, keeping the default file names.
    #[must_use]
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            partition_prefix: dir.join("key"),
            program_path: dir.join("program.json"),
            result_path: dir.join("result.csv"),
            expected_path: dir.join("expected.csv"),
            truncation: TruncationPolicy::default(),
        }
    }

    /// Sets the partition prefix.
    #[must_use]
    pub fn with_partition_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.partition_prefix = prefix.into();
        self
    }

    /// Sets the program path.
    #[must_use]
    pub fn with_program_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.program_path = path.into();
        self
    }

    /// Sets the result path.
    #[must_use]
    pub fn with_result_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_path = path.into();
        self
    }

    /// Sets the expected result path.
    #[must_use]
    pub fn with_expected_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.expected_path = path.into();
        self
    }

    /// Returns the partition source for the configured prefix.
    #[must_use]
    pub fn partitions(&self) -> PartitionSource {
        PartitionSource::new(&self.partition_prefix)
    }
}
