//! Compiled transforms.

use super::{Aggregate, Arithmetic, Predicate};
use crate::core::{OperatorKind, RecordTable, TruncationPolicy};
use crate::errors::Result;
use crate::expression::FunctionExpr;
use std::fmt;

/// A validated `(operator, function)` pair, ready to run.
///
/// Compiling resolves every name and parameter, so applying a transform
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// FILTER
    Filter(Predicate),
    /// MAP
    Map(Arithmetic),
    /// CHANGEKEY
    ChangeKey(Arithmetic),
    /// REDUCE
    Reduce(Aggregate),
}

impl Transform {
    /// Parses and compiles a function expression under `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is not part of the operator's
    /// vocabulary or its parameter is invalid.
    pub fn compile(kind: OperatorKind, function: &str, policy: TruncationPolicy) -> Result<Self> {
        let expr = FunctionExpr::parse(function);
        Ok(match kind {
            OperatorKind::Filter => Self::Filter(Predicate::compile(&expr)?),
            OperatorKind::Map => Self::Map(Arithmetic::compile(kind, &expr, policy)?),
            OperatorKind::ChangeKey => Self::ChangeKey(Arithmetic::compile(kind, &expr, policy)?),
            OperatorKind::Reduce => Self::Reduce(Aggregate::compile(&expr)?),
        })
    }

    /// Returns the operator family.
    #[must_use]
    pub fn kind(&self) -> OperatorKind {
        match self {
            Self::Filter(_) => OperatorKind::Filter,
            Self::Map(_) => OperatorKind::Map,
            Self::ChangeKey(_) => OperatorKind::ChangeKey,
            Self::Reduce(_) => OperatorKind::Reduce,
        }
    }

    /// Applies the transform, returning a new table.
    #[must_use]
    pub fn apply(&self, table: RecordTable) -> RecordTable {
        match self {
            Self::Filter(predicate) => predicate.apply(table),
            Self::Map(function) => function.map_values(table),
            Self::ChangeKey(function) => function.rekey(table),
            Self::Reduce(aggregate) => aggregate.apply(table),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(p) => write!(f, "FILTER {p:?}"),
            Self::Map(a) => write!(f, "MAP {:?}", a.op()),
            Self::ChangeKey(a) => write!(f, "CHANGEKEY {:?}", a.op()),
            Self::Reduce(g) => write!(f, "REDUCE {g:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DataflowError;

    #[test]
    fn test_compile_dispatches_on_kind() {
        let policy = TruncationPolicy::default();
        let t = Transform::compile(OperatorKind::Map, "ADD(1)", policy).unwrap();
        assert_eq!(t.kind(), OperatorKind::Map);

        let t = Transform::compile(OperatorKind::ChangeKey, "ADD(1)", policy).unwrap();
        assert_eq!(t.kind(), OperatorKind::ChangeKey);
    }

    #[test]
    fn test_function_vocabulary_is_per_operator() {
        let policy = TruncationPolicy::default();
        let err = Transform::compile(OperatorKind::Filter, "SUM", policy).unwrap_err();
        assert!(matches!(err, DataflowError::UnsupportedFunction { .. }));

        let err = Transform::compile(OperatorKind::Reduce, "IS_EVEN", policy).unwrap_err();
        assert!(matches!(err, DataflowError::UnsupportedFunction { .. }));
    }

    #[test]
    fn test_map_and_changekey_differ() {
        let policy = TruncationPolicy::default();
        let table = RecordTable::from_pairs(&[(1, 4)]);

        let mapped = Transform::compile(OperatorKind::Map, "ADD(1)", policy)
            .unwrap()
            .apply(table.clone());
        let rekeyed = Transform::compile(OperatorKind::ChangeKey, "ADD(1)", policy)
            .unwrap()
            .apply(table);

        assert_eq!(mapped.to_pairs(), vec![(1, 5)]);
        assert_eq!(rekeyed.to_pairs(), vec![(5, 4)]);
    }
}
