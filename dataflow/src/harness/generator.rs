//! Random partition generation.

use crate::core::{Record, RecordTable, Value};
use crate::errors::{DataflowError, Result};
use crate::io::PartitionSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Parameters for partition generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of partitions; partition `i` holds only key `i`.
    pub keys: usize,
    /// Rows per partition.
    pub values_per_key: usize,
    /// Values are drawn uniformly from `1..=max_value`.
    pub max_value: Value,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Creates a generator configuration without a seed.
    #[must_use]
    pub fn new(keys: usize, values_per_key: usize, max_value: Value) -> Self {
        Self {
            keys,
            values_per_key,
            max_value,
            seed: None,
        }
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Writes partitions `1..=keys`, replacing existing files.
///
/// Returns the number of partitions written.
///
/// # Errors
///
/// Returns an error if `max_value` is below one or a file cannot be written.
pub fn generate(source: &PartitionSource, config: &GeneratorConfig) -> Result<usize> {
    if config.max_value < 1 {
        return Err(DataflowError::InvalidConfig {
            path: source.prefix().to_path_buf(),
            message: format!("max value must be at least 1, got {}", config.max_value),
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for index in 1..=config.keys {
        let key = Value::try_from(index).unwrap_or(Value::MAX);
        let partition: RecordTable = (0..config.values_per_key)
            .map(|_| Record::new(key, rng.gen_range(1..=config.max_value)))
            .collect();
        source.write(index, &partition)?;
    }

    info!(
        partitions = config.keys,
        rows_per_partition = config.values_per_key,
        prefix = %source.prefix().display(),
        "Generated partitions"
    );
    Ok(config.keys)
}
