//! Test fixtures for pipeline testing.

use std::path::Path;

use crate::core::{Record, RecordTable};
use crate::errors::Result;
use crate::io::PartitionSource;
use crate::pipeline::PipelineConfig;

/// Builds a table where every record has the same key.
#[must_use]
pub fn keyed(key: i64, values: &[i64]) -> RecordTable {
    values.iter().map(|v| Record::new(key, *v)).collect()
}

/// An in-memory set of partitions that can be written to disk.
///
/// Partitions are numbered from 1 in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PartitionFixture {
    partitions: Vec<RecordTable>,
}

impl PartitionFixture {
    /// Creates an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a partition.
    #[must_use]
    pub fn with_partition(mut self, table: RecordTable) -> Self {
        self.partitions.push(table);
        self
    }

    /// Adds partition `i` holding `values` under key `i`.
    #[must_use]
    pub fn with_values(self, values: &[i64]) -> Self {
        let key = i64::try_from(self.partitions.len() + 1).unwrap_or(i64::MAX);
        self.with_partition(keyed(key, values))
    }

    /// Returns the number of partitions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.partitions.len()
    }

    /// Returns every partition concatenated in index order.
    #[must_use]
    pub fn merged(&self) -> RecordTable {
        let mut merged = RecordTable::new();
        for partition in &self.partitions {
            merged.append(partition.clone());
        }
        merged
    }

    /// Writes every partition through `source`.
    pub fn write_to(&self, source: &PartitionSource) -> Result<()> {
        for (index, partition) in self.partitions.iter().enumerate() {
            source.write(index + 1, partition)?;
        }
        Ok(())
    }
}

/// A pipeline configuration under construction for tests.
#[derive(Debug, Clone, Default)]
pub struct TestProgram {
    config: PipelineConfig,
}

impl TestProgram {
    /// Creates an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation.
    #[must_use]
    pub fn op(mut self, operator: &str, function: &str) -> Self {
        self.config = self.config.with_operation(operator, function);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Writes the program as JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.config).map_err(std::io::Error::other)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_rows;

    #[test]
    fn test_keyed() {
        assert_rows(&keyed(3, &[1, 2]), &[(3, 1), (3, 2)]);
    }

    #[test]
    fn test_partition_fixture_numbers_keys() {
        let fixture = PartitionFixture::new().with_values(&[4, 7]).with_values(&[10]);
        assert_eq!(fixture.count(), 2);
        assert_rows(&fixture.merged(), &[(1, 4), (1, 7), (2, 10)]);
    }

    #[test]
    fn test_program_roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.json");
        let program = TestProgram::new().op("FILTER", "IS_ODD").op("REDUCE", "SUM");
        program.write_to(&path).unwrap();

        assert_eq!(&PipelineConfig::load(&path).unwrap(), program.config());
    }
}
