//! Test assertions for record tables.

use crate::core::RecordTable;

/// Asserts that a table holds exactly `expected`, in order.
pub fn assert_rows(table: &RecordTable, expected: &[(i64, i64)]) {
    assert_eq!(
        table.to_pairs(),
        expected,
        "Table rows differ from the expected rows"
    );
}

/// Asserts that two tables hold the same records, ignoring order.
pub fn assert_equivalent(actual: &RecordTable, expected: &RecordTable) {
    assert!(
        actual.equivalent(expected),
        "Tables are not equivalent:\n  actual:   {:?}\n  expected: {:?}",
        actual.sorted().to_pairs(),
        expected.sorted().to_pairs()
    );
}

/// Asserts that two tables differ as multisets.
pub fn assert_not_equivalent(actual: &RecordTable, expected: &RecordTable) {
    assert!(
        !actual.equivalent(expected),
        "Expected tables to differ, both hold: {:?}",
        actual.sorted().to_pairs()
    );
}

/// Asserts that keys never decrease along the table.
pub fn assert_sorted_by_key(table: &RecordTable) {
    let keys: Vec<i64> = table.iter().map(|r| r.key).collect();
    assert!(
        keys.windows(2).all(|w| w[0] <= w[1]),
        "Keys are not in ascending order: {keys:?}"
    );
}
