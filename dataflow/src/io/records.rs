//! Reading and writing two-column record files.

use crate::core::{Key, Record, RecordTable, Value};
use crate::errors::{DataflowError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

/// Whether a record file may start with a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Every line is a record.
    #[default]
    Absent,
    /// A first line with no numeric field is treated as a header and skipped.
    Optional,
}

/// Reads a record file.
///
/// # Errors
///
/// Returns [`DataflowError::MissingInput`] if the file does not exist and
/// [`DataflowError::MalformedRecord`] for a line that is not two integers.
pub fn read_table(path: &Path, header: HeaderMode) -> Result<RecordTable> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataflowError::missing_input(path),
        _ => DataflowError::Io(e),
    })?;

    let table = read_records(file, path, header)?;
    debug!(path = %path.display(), rows = table.len(), "Read record file");
    Ok(table)
}

fn read_records<R: Read>(reader: R, source: &Path, header: HeaderMode) -> Result<RecordTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = RecordTable::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        match parse_row(&row) {
            Some(record) => table.push(record),
            None if index == 0 && header == HeaderMode::Optional && is_header(&row) => {
                debug!(path = %source.display(), "Skipping header row");
            }
            None => {
                return Err(DataflowError::MalformedRecord {
                    path: source.to_path_buf(),
                    line: row.position().map_or(index as u64 + 1, csv::Position::line),
                    content: row.iter().collect::<Vec<_>>().join(","),
                });
            }
        }
    }

    Ok(table)
}

fn is_header(row: &csv::StringRecord) -> bool {
    row.iter().all(|field| field.parse::<i64>().is_err())
}

fn parse_row(row: &csv::StringRecord) -> Option<Record> {
    if row.len() != 2 {
        return None;
    }
    let key = row.get(0)?.parse::<Key>().ok()?;
    let value = row.get(1)?.parse::<Value>().ok()?;
    Some(Record::new(key, value))
}

fn write_records<W: Write>(writer: W, table: &RecordTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Serializes a table to the record file layout.
///
/// # Errors
///
/// Returns an error if CSV encoding fails.
pub fn encode(table: &RecordTable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, table)?;
    Ok(buffer)
}

/// Returns the hex SHA-256 digest of the table's serialized form.
///
/// Two tables have the same digest exactly when their result files would be
/// byte-identical.
///
/// # Errors
///
/// Returns an error if CSV encoding fails.
pub fn digest(table: &RecordTable) -> Result<String> {
    let bytes = encode(table)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Writes a table to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_table(path: &Path, table: &RecordTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_records(file, table)?;
    debug!(path = %path.display(), rows = table.len(), "Wrote record file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str, header: HeaderMode) -> Result<RecordTable> {
        read_records(text.as_bytes(), Path::new("inline.csv"), header)
    }

    #[test]
    fn test_read_records() {
        let table = parse("1,4\n1,7\n2,10\n", HeaderMode::Absent).unwrap();
        assert_eq!(table.to_pairs(), vec![(1, 4), (1, 7), (2, 10)]);
    }

    #[test]
    fn test_read_trims_whitespace_and_negative_values() {
        let table = parse(" 3 , -2\n", HeaderMode::Absent).unwrap();
        assert_eq!(table.to_pairs(), vec![(3, -2)]);
    }

    #[test]
    fn test_read_rejects_header_when_absent() {
        let err = parse("key,value\n1,2\n", HeaderMode::Absent).unwrap_err();
        assert!(matches!(err, DataflowError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_skips_optional_header() {
        let table = parse("key,value\n1,2\n", HeaderMode::Optional).unwrap();
        assert_eq!(table.to_pairs(), vec![(1, 2)]);

        let table = parse("1,2\n3,4\n", HeaderMode::Optional).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_rejects_bad_rows() {
        let err = parse("1,2\n3\n", HeaderMode::Absent).unwrap_err();
        assert!(matches!(err, DataflowError::MalformedRecord { line: 2, .. }));

        let err = parse("1,2,3\n", HeaderMode::Absent).unwrap_err();
        assert!(matches!(err, DataflowError::MalformedRecord { .. }));

        let err = parse("1,x\n", HeaderMode::Optional).unwrap_err();
        assert!(matches!(err, DataflowError::MalformedRecord { .. }));
    }

    #[test]
    fn test_encode_layout() {
        let table = RecordTable::from_pairs(&[(1, 5), (2, 11)]);
        let bytes = encode(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1,5\n2,11\n");
    }

    #[test]
    fn test_digest_is_order_sensitive() {
        let a = RecordTable::from_pairs(&[(1, 5), (2, 11)]);
        let b = RecordTable::from_pairs(&[(2, 11), (1, 5)]);
        assert_eq!(digest(&a).unwrap(), digest(&a.clone()).unwrap());
        assert_ne!(digest(&a).unwrap(), digest(&b).unwrap());
        assert_eq!(digest(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("result.csv");
        let table = RecordTable::from_pairs(&[(1, 8), (2, 2)]);

        write_table(&path, &table).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,8\n2,2\n");
        assert_eq!(read_table(&path, HeaderMode::Absent).unwrap(), table);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("absent.csv"), HeaderMode::Absent).unwrap_err();
        assert!(err.is_missing_input());
    }
}
