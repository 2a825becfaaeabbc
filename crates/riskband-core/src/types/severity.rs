//! Severity bands and signs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Discrete risk level, ordered by ascending concern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    /// Negligible.
    #[default]
    Minimal,
    /// Low.
    Low,
    /// Moderate.
    Moderate,
    /// High.
    High,
}

impl SeverityBand {
    /// Every band, from least to most severe.
    pub const ALL: [SeverityBand; 4] = [Self::Minimal, Self::Low, Self::Moderate, Self::High];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Strictly below zero.
    Negative,
    /// Zero (including negative zero).
    Zero,
    /// Strictly above zero.
    Positive,
}

impl Sign {
    /// Sign of a float. NaN is treated as zero.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn as_i8(&self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = CoreError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Negative),
            0 => Ok(Self::Zero),
            1 => Ok(Self::Positive),
            _ => Err(CoreError::InvalidSign { value }),
        }
    }
}
