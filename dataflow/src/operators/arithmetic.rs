//! Arithmetic functions shared by MAP and CHANGEKEY.
//!
//! Both families evaluate `value op P`. MAP writes the result back into the
//! value, CHANGEKEY writes it into the key and leaves the value untouched.

use crate::core::{OperatorKind, Record, RecordTable, TruncationPolicy, Value};
use crate::errors::{DataflowError, Result};
use crate::expression::FunctionExpr;
use std::num::NonZeroI64;

/// An arithmetic operation with its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `ADD(p)`
    Add(Value),
    /// `SUBTRACT(p)`
    Subtract(Value),
    /// `MULTIPLY(p)`
    Multiply(Value),
    /// `DIVIDE(p)`, p != 0
    Divide(NonZeroI64),
}

/// A compiled arithmetic function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    op: ArithmeticOp,
    policy: TruncationPolicy,
}

impl Arithmetic {
    /// Creates an arithmetic function from an operation and policy.
    #[must_use]
    pub fn new(op: ArithmeticOp, policy: TruncationPolicy) -> Self {
        Self { op, policy }
    }

    /// Compiles an arithmetic function expression for `kind`.
    ///
    /// `kind` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is unknown, its parameter is not an
    /// integer, or it divides by zero.
    pub fn compile(
        kind: OperatorKind,
        expr: &FunctionExpr,
        policy: TruncationPolicy,
    ) -> Result<Self> {
        let op = match expr.name.as_str() {
            "ADD" => ArithmeticOp::Add(expr.integer_parameter()?),
            "SUBTRACT" => ArithmeticOp::Subtract(expr.integer_parameter()?),
            "MULTIPLY" => ArithmeticOp::Multiply(expr.integer_parameter()?),
            "DIVIDE" => {
                let divisor = expr.integer_parameter()?;
                let divisor = NonZeroI64::new(divisor).ok_or_else(|| {
                    DataflowError::DivisionByZero {
                        operator: kind.as_str().to_string(),
                        function: expr.to_string(),
                    }
                })?;
                ArithmeticOp::Divide(divisor)
            }
            other => {
                return Err(DataflowError::unsupported_function(kind.as_str(), other));
            }
        };

        Ok(Self::new(op, policy))
    }

    /// Returns the operation.
    #[must_use]
    pub fn op(&self) -> ArithmeticOp {
        self.op
    }

    /// Evaluates the function for one value.
    ///
    /// Addition, subtraction and multiplication wrap on overflow.
    #[must_use]
    pub fn evaluate(&self, value: Value) -> Value {
        match self.op {
            ArithmeticOp::Add(p) => value.wrapping_add(p),
            ArithmeticOp::Subtract(p) => value.wrapping_sub(p),
            ArithmeticOp::Multiply(p) => value.wrapping_mul(p),
            ArithmeticOp::Divide(p) => self.policy.divide_nonzero(value, p),
        }
    }

    /// MAP: replaces every value with `value op P`, keeping keys and order.
    #[must_use]
    pub fn map_values(&self, table: RecordTable) -> RecordTable {
        table
            .into_iter()
            .map(|r| Record::new(r.key, self.evaluate(r.value)))
            .collect()
    }

    /// CHANGEKEY: replaces every key with `value op P`, keeping values and order.
    ///
    /// Rows that end up sharing a key are not merged.
    #[must_use]
    pub fn rekey(&self, table: RecordTable) -> RecordTable {
        table
            .into_iter()
            .map(|r| Record::new(self.evaluate(r.value), r.value))
            .collect()
    }
}
