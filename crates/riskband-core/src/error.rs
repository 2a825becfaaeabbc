//! Error types for riskband value types.
//!
//! Construction and validation of samples, kinds and signs report failures
//! through [`CoreError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or validating core value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A sample value was NaN or infinite.
    #[error("Non-finite value for '{label}': {value}")]
    NonFiniteValue {
        /// Label of the offending sample.
        label: String,
        /// The rejected value.
        value: f64,
    },

    /// A sample weight was negative or not finite.
    #[error("Invalid weight for '{label}': {weight}")]
    InvalidWeight {
        /// Label of the offending sample.
        label: String,
        /// The rejected weight.
        weight: f64,
    },

    /// A metric kind name did not match any known kind.
    #[error("Unknown metric kind: {name}")]
    UnknownMetricKind {
        /// The unrecognised name.
        name: String,
    },

    /// A sign was not one of -1, 0 or 1.
    #[error("Invalid sign: {value} (expected -1, 0 or 1)")]
    InvalidSign {
        /// The rejected value.
        value: i8,
    },
}

impl CoreError {
    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(label: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteValue {
            label: label.into(),
            value,
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(label: impl Into<String>, weight: f64) -> Self {
        Self::InvalidWeight {
            label: label.into(),
            weight,
        }
    }

    /// Create an unknown metric kind error.
    #[must_use]
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownMetricKind { name: name.into() }
    }
}
