//! Operator family enum.

use crate::errors::DataflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The family of transform an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatorKind {
    /// Keeps records whose value satisfies a predicate.
    Filter,
    /// Rewrites the value of every record.
    Map,
    /// Rewrites the key of every record from its value.
    #[serde(rename = "CHANGEKEY")]
    ChangeKey,
    /// Collapses records sharing a key into one.
    Reduce,
}

impl OperatorKind {
    /// All operator families, in declaration order.
    pub const ALL: [Self; 4] = [Self::Filter, Self::Map, Self::ChangeKey, Self::Reduce];

    /// Returns the configuration spelling of the operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "FILTER",
            Self::Map => "MAP",
            Self::ChangeKey => "CHANGEKEY",
            Self::Reduce => "REDUCE",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKind {
    type Err = DataflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DataflowError::unsupported_operator(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_kind_display() {
        assert_eq!(OperatorKind::Filter.to_string(), "FILTER");
        assert_eq!(OperatorKind::Map.to_string(), "MAP");
        assert_eq!(OperatorKind::ChangeKey.to_string(), "CHANGEKEY");
        assert_eq!(OperatorKind::Reduce.to_string(), "REDUCE");
    }

    #[test]
    fn test_operator_kind_parse() {
        assert_eq!("CHANGEKEY".parse::<OperatorKind>().unwrap(), OperatorKind::ChangeKey);
        assert!(matches!(
            "filter".parse::<OperatorKind>(),
            Err(DataflowError::UnsupportedOperator { .. })
        ));
        assert!("SORT".parse::<OperatorKind>().is_err());
    }

    #[test]
    fn test_operator_kind_serialize() {
        let json = serde_json::to_string(&OperatorKind::ChangeKey).unwrap();
        assert_eq!(json, r#""CHANGEKEY""#);

        let kind: OperatorKind = serde_json::from_str(r#""REDUCE""#).unwrap();
        assert_eq!(kind, OperatorKind::Reduce);
    }
}
