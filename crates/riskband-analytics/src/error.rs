//! Error types for risk analytics.
//!
//! All errors are local to the call that raised them; none are transient.

use riskband_core::{CoreError, MetricKind};
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during classification and aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// No threshold table (and no fallback) for the metric kind.
    #[error("No threshold table registered for metric kind '{kind}'")]
    UnknownMetricKind {
        /// The unregistered kind.
        kind: MetricKind,
    },

    /// The operation needs at least one input.
    #[error("Empty input for {operation}")]
    EmptyInput {
        /// The operation that failed.
        operation: String,
    },

    /// Division by zero.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The operation that failed.
        operation: String,
    },

    /// A sample or value broke its invariants.
    #[error("Invalid sample: {reason}")]
    InvalidSample {
        /// Why the sample was rejected.
        reason: String,
    },

    /// A correlation matrix was malformed.
    #[error("Invalid correlation matrix: {reason}")]
    InvalidMatrix {
        /// Why the matrix was rejected.
        reason: String,
    },

    /// A return series is too short for the statistic.
    #[error("{operation} needs at least {required} observations, got {actual}")]
    InsufficientData {
        /// The operation that failed.
        operation: String,
        /// Minimum number of observations.
        required: usize,
        /// Number supplied.
        actual: usize,
    },

    /// A parameter is outside its domain.
    #[error("Invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A numerical routine failed.
    #[error("Calculation failed: {reason}")]
    CalculationFailed {
        /// Failure details.
        reason: String,
    },
}

impl AnalyticsError {
    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create a division by zero error.
    #[must_use]
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create an invalid sample error.
    #[must_use]
    pub fn invalid_sample(reason: impl Into<String>) -> Self {
        Self::InvalidSample {
            reason: reason.into(),
        }
    }

    /// Create an invalid matrix error.
    #[must_use]
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            reason: reason.into(),
        }
    }
}

impl AnalyticsError {
    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(operation: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            operation: operation.into(),
            required,
            actual,
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a calculation failed error.
    #[must_use]
    pub fn calculation_failed(reason: impl Into<String>) -> Self {
        Self::CalculationFailed {
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        Self::invalid_sample(err.to_string())
    }
}
