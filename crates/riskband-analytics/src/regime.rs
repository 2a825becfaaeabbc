//! Volatility regime detection.
//!
//! Labels each period of a rolling volatility series as calm, neutral or
//! volatile against a pair of thresholds, and computes rolling z-scores of
//! a series against its own trailing window.

use std::fmt;

use serde::{Deserialize, Serialize};

use riskband_core::SeverityBand;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{check_window, mean, std_dev, ZERO_DISPERSION};

/// Market regime implied by a volatility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    /// Below the low threshold.
    Calm,
    /// Between the thresholds, inclusive.
    Neutral,
    /// Above the high threshold.
    Volatile,
}

impl VolatilityRegime {
    /// Every regime, calmest first.
    pub const ALL: [VolatilityRegime; 3] = [Self::Calm, Self::Neutral, Self::Volatile];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Neutral => "Neutral",
            Self::Volatile => "Volatile",
        }
    }

    /// Severity band used to color the regime.
    #[must_use]
    pub fn band(self) -> SeverityBand {
        match self {
            Self::Calm => SeverityBand::Low,
            Self::Neutral => SeverityBand::Moderate,
            Self::Volatile => SeverityBand::High,
        }
    }
}

impl fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Volatility bounds separating the regimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeThresholds {
    /// Volatility below this is calm.
    pub low: f64,
    /// Volatility above this is volatile.
    pub high: f64,
}

impl RegimeThresholds {
    /// Creates validated thresholds.
    pub fn new(low: f64, high: f64) -> AnalyticsResult<Self> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks both bounds are finite and `low <= high`.
    ///
    /// Needed for deserialized thresholds.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(AnalyticsError::invalid_parameter(
                "regime thresholds",
                format!("need finite low <= high, got {} and {}", self.low, self.high),
            ));
        }
        Ok(())
    }

    fn regime_for(&self, volatility: f64) -> VolatilityRegime {
        if volatility > self.high {
            VolatilityRegime::Volatile
        } else if volatility < self.low {
            VolatilityRegime::Calm
        } else {
            VolatilityRegime::Neutral
        }
    }
}

/// Regime of one volatility level.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidParameter`] for invalid thresholds
/// - [`AnalyticsError::InvalidSample`] for a non-finite or negative volatility
pub fn detect_volatility_regime(
    volatility: f64,
    thresholds: &RegimeThresholds,
) -> AnalyticsResult<VolatilityRegime> {
    thresholds.validate()?;
    check_volatility(volatility)?;
    Ok(thresholds.regime_for(volatility))
}

/// Regime of every level in a rolling volatility series, in order.
pub fn volatility_regimes(
    volatilities: &[f64],
    thresholds: &RegimeThresholds,
) -> AnalyticsResult<Vec<VolatilityRegime>> {
    thresholds.validate()?;
    volatilities
        .iter()
        .map(|v| {
            check_volatility(*v)?;
            Ok(thresholds.regime_for(*v))
        })
        .collect()
}

/// Rolling z-score of each value against its trailing window.
///
/// Entry `i` scores `series[i + window - 1]` against the mean and population
/// standard deviation of `series[i..i + window]`. A window with no
/// dispersion yields `None`.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidParameter`] for a window below 2
/// - [`AnalyticsError::InsufficientData`] when the series is shorter than the window
/// - [`AnalyticsError::InvalidSample`] for a non-finite value
pub fn rolling_z_scores(series: &[f64], window: usize) -> AnalyticsResult<Vec<Option<f64>>> {
    check_window(window)?;
    if let Some(bad) = series.iter().find(|v| !v.is_finite()) {
        return Err(AnalyticsError::invalid_sample(format!(
            "z-score series has non-finite value {bad}"
        )));
    }
    if series.len() < window {
        return Err(AnalyticsError::insufficient_data(
            "rolling z-score",
            window,
            series.len(),
        ));
    }

    Ok(series
        .windows(window)
        .map(|w| {
            let sd = std_dev(w, 0);
            if sd < ZERO_DISPERSION {
                return None;
            }
            Some((w[w.len() - 1] - mean(w)) / sd)
        })
        .collect())
}

fn check_volatility(volatility: f64) -> AnalyticsResult<()> {
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(AnalyticsError::invalid_sample(format!(
            "volatility {volatility} must be finite and non-negative"
        )));
    }
    Ok(())
}
