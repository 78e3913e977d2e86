//! REDUCE functions.

use crate::core::{Key, OperatorKind, Record, RecordTable, Value};
use crate::errors::{DataflowError, Result};
use crate::expression::FunctionExpr;
use std::collections::BTreeMap;

/// An aggregate applied to every group of records sharing a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// `SUM`: wrapping sum of the group's values.
    Sum,
    /// `PRODUCT`: wrapping product of the group's values.
    Product,
    /// `MIN`: smallest value of the group.
    Min,
    /// `MAX`: largest value of the group.
    Max,
    /// `COUNT`: number of rows in the group.
    Count,
}

impl Aggregate {
    /// Compiles a REDUCE function expression.
    ///
    /// Reduce functions take no parameter; one that is present is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the function name is unknown.
    pub fn compile(expr: &FunctionExpr) -> Result<Self> {
        match expr.name.as_str() {
            "SUM" => Ok(Self::Sum),
            "PRODUCT" => Ok(Self::Product),
            "MIN" => Ok(Self::Min),
            "MAX" => Ok(Self::Max),
            "COUNT" => Ok(Self::Count),
            other => Err(DataflowError::unsupported_function(
                OperatorKind::Reduce.as_str(),
                other,
            )),
        }
    }

    /// Combines the values of one non-empty group.
    fn combine(self, values: &[Value]) -> Value {
        match self {
            Self::Sum => values.iter().fold(0, |acc, v| acc.wrapping_add(*v)),
            Self::Product => values.iter().fold(1, |acc, v| acc.wrapping_mul(*v)),
            Self::Min => values.iter().copied().min().unwrap_or_default(),
            Self::Max => values.iter().copied().max().unwrap_or_default(),
            Self::Count => Value::try_from(values.len()).unwrap_or(Value::MAX),
        }
    }

    /// Groups records by key and emits one record per group.
    ///
    /// Groups are emitted in ascending key order.
    #[must_use]
    pub fn apply(&self, table: RecordTable) -> RecordTable {
        let mut groups: BTreeMap<Key, Vec<Value>> = BTreeMap::new();
        for record in table {
            groups.entry(record.key).or_default().push(record.value);
        }

        groups
            .into_iter()
            .map(|(key, values)| Record::new(key, self.combine(&values)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(text: &str) -> Result<Aggregate> {
        Aggregate::compile(&FunctionExpr::parse(text))
    }

    #[test]
    fn test_compile_vocabulary() {
        assert_eq!(compile("SUM").unwrap(), Aggregate::Sum);
        assert_eq!(compile("PRODUCT").unwrap(), Aggregate::Product);
        assert_eq!(compile("MIN").unwrap(), Aggregate::Min);
        assert_eq!(compile("MAX").unwrap(), Aggregate::Max);
        assert_eq!(compile("COUNT").unwrap(), Aggregate::Count);
    }

    #[test]
    fn test_compile_unknown_function() {
        assert!(matches!(
            compile("AVG").unwrap_err(),
            DataflowError::UnsupportedFunction { ref operator, .. } if operator == "REDUCE"
        ));
    }

    #[test]
    fn test_sum_groups_in_key_order() {
        let table = RecordTable::from_pairs(&[(2, 2), (1, 3), (1, 5)]);
        let reduced = Aggregate::Sum.apply(table);
        assert_eq!(reduced.to_pairs(), vec![(1, 8), (2, 2)]);
    }

    #[test]
    fn test_sum_conserves_total() {
        let table = RecordTable::from_pairs(&[(3, 1), (1, 2), (3, 3), (2, 4), (1, 5)]);
        let total: i64 = table.iter().map(|r| r.value).sum();
        let reduced = Aggregate::Sum.apply(table);
        assert_eq!(reduced.iter().map(|r| r.value).sum::<i64>(), total);
        assert_eq!(reduced.len(), 3);
    }

    #[test]
    fn test_product() {
        let table = RecordTable::from_pairs(&[(1, 2), (1, 3), (1, 4), (2, 5)]);
        assert_eq!(Aggregate::Product.apply(table).to_pairs(), vec![(1, 24), (2, 5)]);
    }

    #[test]
    fn test_min_max_count() {
        let table = RecordTable::from_pairs(&[(1, 7), (1, -2), (1, 4), (2, 9)]);
        assert_eq!(Aggregate::Min.apply(table.clone()).to_pairs(), vec![(1, -2), (2, 9)]);
        assert_eq!(Aggregate::Max.apply(table.clone()).to_pairs(), vec![(1, 7), (2, 9)]);
        assert_eq!(Aggregate::Count.apply(table).to_pairs(), vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn test_empty_table() {
        assert!(Aggregate::Sum.apply(RecordTable::new()).is_empty());
    }
}
