//! Records and record tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record key type.
pub type Key = i64;

/// Record value type.
pub type Value = i64;

/// A single `(key, value)` pair.
///
/// Ordering is lexicographic on `(key, value)`, which is the order used when
/// tables are normalized for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Record {
    /// The record key. Keys need not be unique within a table.
    pub key: Key,
    /// The record value.
    pub value: Value,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub const fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }
}

impl From<(Key, Value)> for Record {
    fn from((key, value): (Key, Value)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}

/// An ordered multiset of records.
///
/// This is the only data shape that flows between pipeline stages. Every
/// transform consumes a table and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Builds a table from `(key, value)` pairs, preserving order.
    #[must_use]
    pub fn from_pairs(pairs: &[(Key, Value)]) -> Self {
        pairs.iter().copied().map(Record::from).collect()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in table order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Appends every record of `other`, preserving both orders.
    pub fn append(&mut self, mut other: Self) {
        self.records.append(&mut other.records);
    }

    /// Returns the records as `(key, value)` pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(Key, Value)> {
        self.records.iter().map(|r| (r.key, r.value)).collect()
    }

    /// Returns a copy sorted by `(key, value)` ascending.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut records = self.records.clone();
        records.sort_unstable();
        Self { records }
    }

    /// Compares two tables as multisets, ignoring row order.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }
}

impl FromIterator<Record> for RecordTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for RecordTable {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for RecordTable {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<Record>> for RecordTable {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}
