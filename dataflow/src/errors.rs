//! Error types for the dataflow interpreter.
//!
//! Every failure aborts the current run. Errors raised while compiling or
//! applying a single operation are wrapped in [`DataflowError::AtOperation`]
//! so the offending configuration entry can be located.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = DataflowError> = std::result::Result<T, E>;

/// The main error type for dataflow operations.
#[derive(Debug, Error)]
pub enum DataflowError {
    /// The operator is not one of FILTER, MAP, CHANGEKEY, REDUCE.
    #[error("Unsupported operator: {operator}")]
    UnsupportedOperator {
        /// The operator text as written in the configuration.
        operator: String,
    },

    /// The function name is not known to the operator it was used under.
    #[error("Unsupported {operator} function: {function}")]
    UnsupportedFunction {
        /// The operator family.
        operator: String,
        /// The unrecognized function name.
        function: String,
    },

    /// A function parameter could not be converted to the type it needs.
    #[error("Cannot convert parameter {parameter:?} of {function}: {reason}")]
    ParameterConversion {
        /// The function name.
        function: String,
        /// The raw parameter text, if any was given.
        parameter: Option<String>,
        /// Why the conversion failed.
        reason: String,
    },

    /// `DIVIDE(0)` was requested.
    #[error("Cannot divide by zero in {operator} function {function}")]
    DivisionByZero {
        /// The operator family.
        operator: String,
        /// The full function text.
        function: String,
    },

    /// A referenced partition, configuration or result file does not exist.
    #[error("Missing input: {}", path.display())]
    MissingInput {
        /// The path that could not be found.
        path: PathBuf,
    },

    /// A record line could not be parsed as two integer columns.
    #[error("Malformed record in {} at line {line}: {content:?}", path.display())]
    MalformedRecord {
        /// The file holding the record.
        path: PathBuf,
        /// The 1-based line number.
        line: u64,
        /// The raw line content.
        content: String,
    },

    /// A configuration document could not be parsed.
    #[error("Invalid configuration {}: {message}", path.display())]
    InvalidConfig {
        /// The configuration file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// An error raised by a specific operation of the pipeline.
    #[error("Operation #{position} ({operator} {function}) failed: {source}")]
    AtOperation {
        /// 1-based position of the operation in the configuration.
        position: usize,
        /// The operator text.
        operator: String,
        /// The function text.
        function: String,
        /// The underlying error.
        #[source]
        source: Box<DataflowError>,
    },

    /// CSV encoding or decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataflowError {
    /// Creates an unsupported operator error.
    #[must_use]
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    /// Creates an unsupported function error.
    #[must_use]
    pub fn unsupported_function(operator: impl Into<String>, function: impl Into<String>) -> Self {
        Self::UnsupportedFunction {
            operator: operator.into(),
            function: function.into(),
        }
    }

    /// Creates a parameter conversion error.
    #[must_use]
    pub fn parameter_conversion(
        function: impl Into<String>,
        parameter: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ParameterConversion {
            function: function.into(),
            parameter: parameter.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Creates a missing input error.
    #[must_use]
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    /// Wraps this error with the position of the operation that raised it.
    #[must_use]
    pub fn at_operation(
        self,
        position: usize,
        operator: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self::AtOperation {
            position,
            operator: operator.into(),
            function: function.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping operation context.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::AtOperation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns true if the root cause is a missing file.
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        matches!(self.root(), Self::MissingInput { .. })
    }

    /// Returns a stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            Self::UnsupportedFunction { .. } => "UNSUPPORTED_FUNCTION",
            Self::ParameterConversion { .. } => "PARAMETER_CONVERSION",
            Self::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            Self::MissingInput { .. } => "MISSING_INPUT",
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::AtOperation { source, .. } => source.code(),
            Self::Csv(_) => "CSV",
            Self::Io(_) => "IO",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));

        match self {
            Self::UnsupportedOperator { operator } => {
                map.insert("operator".to_string(), serde_json::json!(operator));
            }
            Self::UnsupportedFunction { operator, function }
            | Self::DivisionByZero { operator, function } => {
                map.insert("operator".to_string(), serde_json::json!(operator));
                map.insert("function".to_string(), serde_json::json!(function));
            }
            Self::ParameterConversion {
                function,
                parameter,
                ..
            } => {
                map.insert("function".to_string(), serde_json::json!(function));
                map.insert("parameter".to_string(), serde_json::json!(parameter));
            }
            Self::MissingInput { path } | Self::InvalidConfig { path, .. } => {
                map.insert("path".to_string(), serde_json::json!(path.display().to_string()));
            }
            Self::MalformedRecord { path, line, .. } => {
                map.insert("path".to_string(), serde_json::json!(path.display().to_string()));
                map.insert("line".to_string(), serde_json::json!(line));
            }
            Self::AtOperation {
                position,
                operator,
                function,
                source,
            } => {
                map.insert("position".to_string(), serde_json::json!(position));
                map.insert("operator".to_string(), serde_json::json!(operator));
                map.insert("function".to_string(), serde_json::json!(function));
                let cause: serde_json::Map<String, serde_json::Value> =
                    source.to_dict().into_iter().collect();
                map.insert("cause".to_string(), serde_json::Value::Object(cause));
            }
            Self::Csv(_) | Self::Io(_) => {}
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_function_message() {
        let err = DataflowError::unsupported_function("FILTER", "IS_PRIME");
        assert_eq!(err.to_string(), "Unsupported FILTER function: IS_PRIME");
        assert_eq!(err.code(), "UNSUPPORTED_FUNCTION");
    }

    #[test]
    fn test_at_operation_keeps_root() {
        let err = DataflowError::unsupported_operator("SORT").at_operation(3, "SORT", "ASC");

        assert!(err.to_string().contains("Operation #3"));
        assert!(matches!(err.root(), DataflowError::UnsupportedOperator { .. }));
        assert_eq!(err.code(), "UNSUPPORTED_OPERATOR");
    }

    #[test]
    fn test_missing_input_detection() {
        let err = DataflowError::missing_input("files/key1.csv");
        assert!(err.is_missing_input());

        let wrapped = DataflowError::missing_input("x").at_operation(1, "MAP", "ADD(1)");
        assert!(wrapped.is_missing_input());

        assert!(!DataflowError::unsupported_operator("X").is_missing_input());
    }

    #[test]
    fn test_to_dict_includes_context() {
        let err = DataflowError::parameter_conversion("LT", Some("ten"), "invalid digit")
            .at_operation(2, "FILTER", "LT(ten)");
        let dict = err.to_dict();

        assert_eq!(dict.get("position").unwrap(), 2);
        assert_eq!(dict.get("operator").unwrap(), "FILTER");
        assert_eq!(dict.get("code").unwrap(), "PARAMETER_CONVERSION");
        let cause = dict.get("cause").unwrap();
        assert_eq!(cause["parameter"], "ten");
    }
}
