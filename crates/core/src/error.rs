//! Error type shared by every formula in the crate.
//!
//! All errors are local to a single call: there is no state to roll back and nothing to
//! retry. Soft range violations (tabulated coefficients, water property regressions) are
//! not errors; they are reported through `tracing::warn!` and the value is saturated.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SeaTrialResult<T> = Result<T, SeaTrialError>;

/// Errors raised by the sea-trial formulas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeaTrialError {
    /// Division by zero, logarithm pole or a non-physical input such as a zero length.
    #[error("{quantity} is undefined: {reason}")]
    Domain {
        quantity: &'static str,
        reason: &'static str,
    },

    /// The vector whose angle was requested has zero magnitude, so atan2(0, 0) carries no
    /// direction information.
    #[error("{quantity} is undefined because the resultant vector has zero magnitude")]
    UndefinedDirection { quantity: &'static str },

    /// Batch arguments of unequal length.
    #[error("length mismatch: `{argument}` has {actual} elements, expected {expected}")]
    ShapeMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A formula was evaluated outside its published range of validity.
    #[error("{formula}: {quantity} = {value} exceeds the validity limit {limit}")]
    OutOfValidityRange {
        formula: &'static str,
        quantity: &'static str,
        value: f64,
        limit: f64,
    },

    /// A wind resistance coefficient table that cannot be interpolated.
    #[error("invalid wind coefficient table: {reason}")]
    InvalidTable { reason: &'static str },
}

impl SeaTrialError {
    pub(crate) fn domain(quantity: &'static str, reason: &'static str) -> Self {
        Self::Domain { quantity, reason }
    }
}

/// Reject a non-positive or non-finite input with a [`SeaTrialError::Domain`] error.
pub(crate) fn ensure_positive(quantity: &'static str, value: f64) -> SeaTrialResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SeaTrialError::domain(quantity, "must be finite and positive"))
    }
}

/// Reject a zero (or non-finite) divisor.
pub(crate) fn ensure_nonzero(quantity: &'static str, value: f64) -> SeaTrialResult<f64> {
    if value.is_finite() && value != 0.0 {
        Ok(value)
    } else {
        Err(SeaTrialError::domain(quantity, "division by zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("length", 2.0), Ok(2.0));
        assert!(ensure_positive("length", 0.0).is_err());
        assert!(ensure_positive("length", f64::NAN).is_err());
    }

    #[test]
    fn test_error_messages_name_the_quantity() {
        let err = SeaTrialError::ShapeMismatch {
            argument: "heading",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: `heading` has 2 elements, expected 3"
        );

        let err = ensure_nonzero("ideal efficiency", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "ideal efficiency is undefined: division by zero");
    }
}
