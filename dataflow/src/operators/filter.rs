//! FILTER functions.

use crate::core::{OperatorKind, RecordTable, Value};
use crate::errors::{DataflowError, Result};
use crate::expression::FunctionExpr;

/// A predicate over record values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `IS_EVEN`: value is divisible by two.
    IsEven,
    /// `IS_ODD`: value is not divisible by two.
    IsOdd,
    /// `LT(p)`: value < p.
    Lt(Value),
    /// `GT(p)`: value > p.
    Gt(Value),
    /// `GTE(p)`: value >= p.
    Gte(Value),
    /// `LTE(p)`: value <= p.
    Lte(Value),
}

impl Predicate {
    /// Compiles a FILTER function expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the function name is unknown or a comparison
    /// function lacks an integer parameter.
    pub fn compile(expr: &FunctionExpr) -> Result<Self> {
        match expr.name.as_str() {
            "IS_EVEN" => Ok(Self::IsEven),
            "IS_ODD" => Ok(Self::IsOdd),
            "LT" => Ok(Self::Lt(expr.integer_parameter()?)),
            "GT" => Ok(Self::Gt(expr.integer_parameter()?)),
            "GTE" => Ok(Self::Gte(expr.integer_parameter()?)),
            "LTE" => Ok(Self::Lte(expr.integer_parameter()?)),
            other => Err(DataflowError::unsupported_function(
                OperatorKind::Filter.as_str(),
                other,
            )),
        }
    }

    /// Evaluates the predicate for a value.
    #[must_use]
    pub fn test(&self, value: Value) -> bool {
        match *self {
            Self::IsEven => value % 2 == 0,
            Self::IsOdd => value % 2 != 0,
            Self::Lt(p) => value < p,
            Self::Gt(p) => value > p,
            Self::Gte(p) => value >= p,
            Self::Lte(p) => value <= p,
        }
    }

    /// Keeps the records whose value satisfies the predicate, in order.
    #[must_use]
    pub fn apply(&self, table: RecordTable) -> RecordTable {
        table.into_iter().filter(|r| self.test(r.value)).collect()
    }
}
