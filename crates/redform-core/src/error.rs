//! Error types for the Redform library.
//!
//! Every input-validation failure is a [`CreditError::InvalidParameter`]:
//! non-positive notional, empty or non-increasing payment schedule, negative
//! time, recovery outside `[0, 1)`, negative spread or hazard, non-finite
//! values. They are raised at the point of detection and never retried.

use redform_math::MathError;
use thiserror::Error;

/// A specialized Result type for Redform operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// The main error type for Redform operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    /// An input violates its documented domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending input.
        name: String,
        /// The value that was provided.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// No credit spread reproduces the requested price.
    #[error("Implied spread failed for target price {target}: {reason}")]
    ImpliedSpreadFailed {
        /// The price that was targeted.
        target: f64,
        /// Description of the failure.
        reason: String,
    },

    /// Numerical routine failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CreditError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Returns true for input-validation failures.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Fails unless `value` is finite.
pub(crate) fn ensure_finite(name: &str, value: f64) -> CreditResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CreditError::invalid_parameter(name, value, "must be finite"))
    }
}
