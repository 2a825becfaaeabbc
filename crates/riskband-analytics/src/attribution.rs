//! Risk attribution against capital allocation.
//!
//! Compares each holding's share of portfolio risk with its share of
//! capital, and each factor exposure with its benchmark exposure.

use std::fmt;

use serde::{Deserialize, Serialize};

use riskband_config::ColorToken;
use riskband_core::MetricSample;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Deviation at or below which an exposure counts as near its benchmark.
pub const NEAR_BENCHMARK_TOLERANCE: f64 = 0.1;

/// Banding of the risk-contribution to allocation ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationRiskLevel {
    /// Ratio below 0.8.
    Low,
    /// Ratio in `[0.8, 1.1]`.
    Normal,
    /// Ratio in `(1.1, 1.3]`.
    Elevated,
    /// Ratio above 1.3.
    High,
}

impl AllocationRiskLevel {
    /// Level for a contribution / allocation ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.3 {
            Self::High
        } else if ratio > 1.1 {
            Self::Elevated
        } else if ratio < 0.8 {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::High => "High",
        }
    }

    /// Color token for the level.
    #[must_use]
    pub fn color(&self) -> ColorToken {
        match self {
            Self::Low => ColorToken::Green,
            Self::Normal => ColorToken::Blue,
            Self::Elevated => ColorToken::Yellow,
            Self::High => ColorToken::Red,
        }
    }
}

impl fmt::Display for AllocationRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Allocation risk level of one holding.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] when `allocation` is zero and
/// [`AnalyticsError::InvalidSample`] for non-finite inputs.
pub fn allocation_risk_level(
    contribution: f64,
    allocation: f64,
) -> AnalyticsResult<AllocationRiskLevel> {
    if !contribution.is_finite() || !allocation.is_finite() {
        return Err(AnalyticsError::invalid_sample(format!(
            "non-finite contribution {contribution} or allocation {allocation}"
        )));
    }
    if allocation == 0.0 {
        return Err(AnalyticsError::division_by_zero("allocation risk level"));
    }
    Ok(AllocationRiskLevel::from_ratio(contribution / allocation))
}

/// Risk contribution in excess of allocation, in percent points.
#[must_use]
pub fn excess_risk(contribution: f64, allocation: f64) -> f64 {
    contribution - allocation
}

/// Attribution row for one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationAttribution {
    /// Holding label.
    pub label: String,
    /// Share of portfolio risk (percent points).
    pub contribution: f64,
    /// Share of capital (percent points).
    pub allocation: f64,
    /// `contribution - allocation`.
    pub excess_risk: f64,
    /// `contribution / allocation`.
    pub ratio: f64,
    /// Banded ratio.
    pub level: AllocationRiskLevel,
}

/// Builds attribution rows, reading `value` as risk contribution and
/// `weight` as allocation.
///
/// # Errors
///
/// Fails on an empty slice, an invalid sample, or a sample whose allocation
/// is missing or zero.
pub fn attribute(samples: &[MetricSample]) -> AnalyticsResult<Vec<AllocationAttribution>> {
    if samples.is_empty() {
        return Err(AnalyticsError::empty_input("attribution"));
    }

    samples
        .iter()
        .map(|s| {
            s.validate()?;
            let allocation = s.weight.ok_or_else(|| {
                AnalyticsError::invalid_sample(format!("'{}' has no allocation", s.label))
            })?;
            let level = allocation_risk_level(s.value, allocation)?;
            Ok(AllocationAttribution {
                label: s.label.clone(),
                contribution: s.value,
                allocation,
                excess_risk: excess_risk(s.value, allocation),
                ratio: s.value / allocation,
                level,
            })
        })
        .collect()
}

/// Distance of a factor exposure from its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorDeviation {
    /// `|exposure - benchmark|`.
    pub deviation: f64,
    /// `deviation <= 0.1`.
    pub near_benchmark: bool,
}

impl fmt::Display for FactorDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.near_benchmark {
            f.write_str("Near benchmark")
        } else {
            write!(f, "{:.2} vs benchmark", self.deviation)
        }
    }
}

/// Compares a factor exposure with its benchmark exposure.
#[must_use]
pub fn benchmark_deviation(exposure: f64, benchmark: f64) -> FactorDeviation {
    let deviation = (exposure - benchmark).abs();
    FactorDeviation {
        deviation,
        near_benchmark: deviation <= NEAR_BENCHMARK_TOLERANCE,
    }
}
