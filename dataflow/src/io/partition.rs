//! Partition file addressing and loading.

use super::records::{read_table, write_table, HeaderMode};
use crate::core::RecordTable;
use crate::errors::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A set of partition files sharing a path prefix.
///
/// Partition `i` (1-based) lives at `<prefix><i>.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSource {
    prefix: PathBuf,
}

impl PartitionSource {
    /// Creates a partition source for a path prefix.
    #[must_use]
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the path prefix.
    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Returns the path of partition `index`.
    #[must_use]
    pub fn path(&self, index: usize) -> PathBuf {
        let mut name = self.prefix.clone().into_os_string();
        name.push(format!("{index}.csv"));
        PathBuf::from(name)
    }

    /// Reads a single partition.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn read(&self, index: usize) -> Result<RecordTable> {
        read_table(&self.path(index), HeaderMode::Absent)
    }

    /// Writes a single partition, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, index: usize, table: &RecordTable) -> Result<()> {
        write_table(&self.path(index), table)
    }

    /// Loads partitions `1..=count` and concatenates them in index order.
    ///
    /// A count of zero yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error on the first partition that is missing or malformed.
    pub fn load(&self, count: usize) -> Result<RecordTable> {
        let mut merged = RecordTable::new();
        for index in 1..=count {
            let partition = self.read(index)?;
            debug!(partition = index, rows = partition.len(), "Loaded partition");
            merged.append(partition);
        }
        info!(partitions = count, rows = merged.len(), "Merged partitions");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partition_paths() {
        let source = PartitionSource::new("files/program3/key");
        assert_eq!(source.path(1), PathBuf::from("files/program3/key1.csv"));
        assert_eq!(source.path(12), PathBuf::from("files/program3/key12.csv"));
    }

    #[test]
    fn test_load_concatenates_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = PartitionSource::new(dir.path().join("key"));
        source.write(1, &RecordTable::from_pairs(&[(1, 4), (1, 7)])).unwrap();
        source.write(2, &RecordTable::from_pairs(&[(2, 10)])).unwrap();
        source.write(3, &RecordTable::from_pairs(&[(3, 1)])).unwrap();

        let merged = source.load(2).unwrap();
        assert_eq!(merged.to_pairs(), vec![(1, 4), (1, 7), (2, 10)]);
    }

    #[test]
    fn test_load_zero_is_empty() {
        let source = PartitionSource::new("does/not/exist/key");
        assert!(source.load(0).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_partition() {
        let dir = tempfile::tempdir().unwrap();
        let source = PartitionSource::new(dir.path().join("key"));
        source.write(1, &RecordTable::from_pairs(&[(1, 1)])).unwrap();

        let err = source.load(2).unwrap_err();
        assert!(err.is_missing_input());
    }
}
