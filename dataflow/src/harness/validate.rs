//! Result validation.

use crate::core::RecordTable;
use crate::errors::{DataflowError, Result};
use crate::io::{read_table, HeaderMode};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of comparing a generated result with an expected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    /// Both tables hold the same records with the same multiplicities.
    Correct,
    /// The tables differ.
    Incorrect {
        /// Rows in the generated table.
        generated_rows: usize,
        /// Rows in the expected table.
        expected_rows: usize,
        /// First differing index after sorting, if the common prefix differs.
        first_mismatch: Option<usize>,
    },
    /// One of the files does not exist yet.
    Unavailable {
        /// The missing file.
        missing: PathBuf,
    },
}

impl Validation {
    /// Returns true if the tables matched.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => write!(f, "Congrats, data is correct!"),
            Self::Incorrect { .. } => write!(f, "Sorry, data is incorrect"),
            Self::Unavailable { .. } => write!(
                f,
                "Data not available. Please generate data and apply operations first."
            ),
        }
    }
}

/// Compares two tables after sorting both by `(key, value)`.
#[must_use]
pub fn compare(generated: &RecordTable, expected: &RecordTable) -> Validation {
    let generated = generated.sorted();
    let expected = expected.sorted();
    if generated == expected {
        return Validation::Correct;
    }

    let first_mismatch = generated
        .iter()
        .zip(expected.iter())
        .position(|(g, e)| g != e);

    Validation::Incorrect {
        generated_rows: generated.len(),
        expected_rows: expected.len(),
        first_mismatch,
    }
}

/// Loads and compares a generated and an expected result file.
///
/// Either file may start with a header row. A missing file is reported as
/// [`Validation::Unavailable`] rather than an error.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be read or parsed.
pub fn validate(generated_path: &Path, expected_path: &Path) -> Result<Validation> {
    let loaded = read_table(generated_path, HeaderMode::Optional)
        .and_then(|g| Ok((g, read_table(expected_path, HeaderMode::Optional)?)));

    let (generated, expected) = match loaded {
        Ok(tables) => tables,
        Err(DataflowError::MissingInput { path }) => {
            warn!(path = %path.display(), "Validation input missing");
            return Ok(Validation::Unavailable { missing: path });
        }
        Err(e) => return Err(e),
    };

    let outcome = compare(&generated, &expected);
    info!(correct = outcome.is_correct(), rows = generated.len(), "Validated result");
    Ok(outcome)
}
