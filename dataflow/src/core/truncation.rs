//! Integer truncation policy for division.
//!
//! Arithmetic functions produce integers only. Division is the one place a
//! rational intermediate appears, and the policy here decides how it is
//! brought back to an integer. The same policy is applied by MAP and
//! CHANGEKEY, so both families agree on every input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroI64;

/// How a rational quotient is converted back to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Drop the fractional part: `-7 / 2 == -3`.
    #[default]
    TowardZero,
    /// Round toward negative infinity: `-7 / 2 == -4`.
    Floor,
}

impl TruncationPolicy {
    /// Divides `dividend` by `divisor` under this policy.
    ///
    /// Returns `None` when `divisor` is zero.
    #[must_use]
    pub fn divide(self, dividend: i64, divisor: i64) -> Option<i64> {
        NonZeroI64::new(divisor).map(|d| self.divide_nonzero(dividend, d))
    }

    /// Divides by a divisor known to be non-zero. `i64::MIN / -1` wraps.
    #[must_use]
    pub fn divide_nonzero(self, dividend: i64, divisor: NonZeroI64) -> i64 {
        let divisor = divisor.get();
        let quotient = dividend.wrapping_div(divisor);
        match self {
            Self::TowardZero => quotient,
            Self::Floor => {
                let inexact = dividend.wrapping_rem(divisor) != 0;
                if inexact && ((dividend < 0) != (divisor < 0)) {
                    quotient - 1
                } else {
                    quotient
                }
            }
        }
    }
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TowardZero => write!(f, "toward_zero"),
            Self::Floor => write!(f, "floor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toward_zero() {
        let policy = TruncationPolicy::TowardZero;
        assert_eq!(policy.divide(7, 2), Some(3));
        assert_eq!(policy.divide(-7, 2), Some(-3));
        assert_eq!(policy.divide(7, -2), Some(-3));
        assert_eq!(policy.divide(6, 3), Some(2));
    }

    #[test]
    fn test_floor() {
        let policy = TruncationPolicy::Floor;
        assert_eq!(policy.divide(7, 2), Some(3));
        assert_eq!(policy.divide(-7, 2), Some(-4));
        assert_eq!(policy.divide(7, -2), Some(-4));
        assert_eq!(policy.divide(-6, 3), Some(-2));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(TruncationPolicy::TowardZero.divide(1, 0), None);
        assert_eq!(TruncationPolicy::Floor.divide(1, 0), None);
    }

    #[test]
    fn test_min_over_minus_one_wraps() {
        assert_eq!(TruncationPolicy::TowardZero.divide(i64::MIN, -1), Some(i64::MIN));
    }

    #[test]
    fn test_default_is_toward_zero() {
        assert_eq!(TruncationPolicy::default(), TruncationPolicy::TowardZero);
    }
}
