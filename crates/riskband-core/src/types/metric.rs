//! Metric kinds and samples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The kind of risk metric a value represents.
///
/// The kind selects which threshold table is used to classify the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// Pairwise correlation coefficient in `[-1, 1]`.
    Correlation,
    /// Factor exposure (loading).
    Exposure,
    /// Share of total portfolio risk, in percent points.
    RiskContribution,
    /// Market beta.
    Beta,
    /// Sharpe ratio.
    Sharpe,
    /// Drawdown as a fraction of peak value.
    Drawdown,
    /// Volatility.
    Volatility,
    /// Any other metric; classified with the default table.
    Generic,
}

impl MetricKind {
    /// Every kind, in declaration order.
    pub const ALL: [MetricKind; 8] = [
        Self::Correlation,
        Self::Exposure,
        Self::RiskContribution,
        Self::Beta,
        Self::Sharpe,
        Self::Drawdown,
        Self::Volatility,
        Self::Generic,
    ];

    /// Returns the canonical (camelCase) name used in configuration files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::Exposure => "exposure",
            Self::RiskContribution => "riskContribution",
            Self::Beta => "beta",
            Self::Sharpe => "sharpe",
            Self::Drawdown => "drawdown",
            Self::Volatility => "volatility",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = CoreError;

    /// Parses a kind name, ignoring case and `_`/`-` separators.
    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == normalized)
            .ok_or_else(|| CoreError::unknown_kind(s))
    }
}

/// A single labelled metric observation.
///
/// Samples are plain values: build them with [`MetricSample::new`], which
/// rejects non-finite values, or deserialize them and call
/// [`MetricSample::validate`].
///
/// # Examples
///
/// ```
/// use riskband_core::types::{MetricKind, MetricSample};
///
/// let nvda = MetricSample::new("NVDA", 22.3, MetricKind::RiskContribution)?
///     .with_weight(15.2)?;
/// assert_eq!(nvda.effective_weight(), 15.2);
/// # Ok::<(), riskband_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Display label (ticker, factor or sector name).
    pub label: String,

    /// Raw metric value. Must be finite.
    pub value: f64,

    /// Optional non-negative weight; treated as 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Metric kind.
    pub kind: MetricKind,
}

impl MetricSample {
    /// Creates an unweighted sample, rejecting NaN and infinite values.
    pub fn new(label: impl Into<String>, value: f64, kind: MetricKind) -> CoreResult<Self> {
        let label = label.into();
        if !value.is_finite() {
            return Err(CoreError::non_finite(label, value));
        }
        Ok(Self {
            label,
            value,
            weight: None,
            kind,
        })
    }

    /// Sets the weight, rejecting negative and non-finite weights.
    pub fn with_weight(mut self, weight: f64) -> CoreResult<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::invalid_weight(self.label, weight));
        }
        self.weight = Some(weight);
        Ok(self)
    }

    /// Weight used in aggregations (1 when no weight was given).
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    /// Absolute value of the sample.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.value.abs()
    }

    /// Checks the sample invariants.
    ///
    /// Needed for samples that did not go through [`MetricSample::new`],
    /// e.g. deserialized ones.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.value.is_finite() {
            return Err(CoreError::non_finite(self.label.clone(), self.value));
        }
        match self.weight {
            Some(w) if !w.is_finite() || w < 0.0 => {
                Err(CoreError::invalid_weight(self.label.clone(), w))
            }
            _ => Ok(()),
        }
    }
}
