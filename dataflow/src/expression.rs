//! Function expression parsing.
//!
//! Operations name their function with a compact call notation: either a
//! bare `NAME` or `NAME(param)`. The parameter is kept as text and only
//! converted when a function needs it.

use crate::errors::{DataflowError, Result};
use std::fmt;

/// A parsed function expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionExpr {
    /// The function name.
    pub name: String,
    /// The raw parameter text, if the expression had one.
    pub parameter: Option<String>,
}

impl FunctionExpr {
    /// Parses a function expression.
    ///
    /// The input must contain exactly one `(` and end with `)` to carry a
    /// parameter. Anything else, including nested or unbalanced
    /// parentheses, is taken verbatim as a bare function name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataflow::expression::FunctionExpr;
    ///
    /// let expr = FunctionExpr::parse("LT(10)");
    /// assert_eq!(expr.name, "LT");
    /// assert_eq!(expr.parameter.as_deref(), Some("10"));
    ///
    /// let bare = FunctionExpr::parse("IS_EVEN");
    /// assert_eq!(bare.name, "IS_EVEN");
    /// assert!(bare.parameter.is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split('(');
        if let (Some(name), Some(rest), None) = (parts.next(), parts.next(), parts.next()) {
            if let Some(parameter) = rest.strip_suffix(')') {
                return Self {
                    name: name.to_string(),
                    parameter: Some(parameter.to_string()),
                };
            }
        }

        Self {
            name: text.to_string(),
            parameter: None,
        }
    }

    /// Returns true if the expression carries a parameter.
    #[must_use]
    pub fn has_parameter(&self) -> bool {
        self.parameter.is_some()
    }

    /// Converts the parameter to an integer.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DataflowError::ParameterConversion`] if the parameter is
    /// absent or is not a valid integer.
    pub fn integer_parameter(&self) -> Result<i64> {
        let raw = self.parameter.as_deref().ok_or_else(|| {
            DataflowError::parameter_conversion(&self.name, None, "missing integer parameter")
        })?;

        raw.trim().parse::<i64>().map_err(|e| {
            DataflowError::parameter_conversion(&self.name, Some(raw), e.to_string())
        })
    }
}

impl fmt::Display for FunctionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{}({})", self.name, parameter),
            None => f.write_str(&self.name),
        }
    }
}
