//! Threshold tables.
//!
//! A [`ThresholdTable`] maps the magnitude of a metric value to a
//! [`SeverityBand`]. Bounds are lower bounds over `abs(value)`, strictly
//! increasing, with bands that never get less severe as the bound grows.
//! Magnitudes below the smallest bound are [`SeverityBand::Minimal`].

use serde::{Deserialize, Serialize};

use riskband_core::SeverityBand;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// BOUND MODE
// =============================================================================

/// Whether a threshold's lower bound is part of its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundMode {
    /// `magnitude >= bound`.
    #[default]
    Inclusive,
    /// `magnitude > bound`.
    Exclusive,
}

impl BoundMode {
    /// Returns true if `magnitude` reaches `bound` under this mode.
    #[must_use]
    pub fn admits(&self, magnitude: f64, bound: f64) -> bool {
        match self {
            Self::Inclusive => magnitude >= bound,
            Self::Exclusive => magnitude > bound,
        }
    }
}

// =============================================================================
// THRESHOLD
// =============================================================================

/// A single `(lower bound, band)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Lower bound over the absolute value.
    pub bound: f64,
    /// Band assigned at or above the bound.
    pub band: SeverityBand,
}

impl Threshold {
    /// Creates a threshold entry.
    #[must_use]
    pub const fn new(bound: f64, band: SeverityBand) -> Self {
        Self { bound, band }
    }
}

// =============================================================================
// TABLE SPEC (unvalidated form)
// =============================================================================

/// Unvalidated threshold table, as written in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTableSpec {
    /// Bound mode for every entry.
    #[serde(default)]
    pub mode: BoundMode,
    /// Entries in ascending bound order.
    pub bands: Vec<Threshold>,
}

impl Validate for ThresholdTableSpec {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.bands.is_empty() {
            errors.push(ValidationError::new(
                "bands",
                "at least one threshold is required",
            ));
            return errors;
        }

        for (i, t) in self.bands.iter().enumerate() {
            if !t.bound.is_finite() {
                errors.push(ValidationError::new(
                    format!("bands[{i}].bound"),
                    format!("bound must be finite, got {}", t.bound),
                ));
            } else if t.bound < 0.0 {
                errors.push(ValidationError::new(
                    format!("bands[{i}].bound"),
                    format!("bound must be non-negative, got {}", t.bound),
                ));
            }
        }

        for (i, pair) in self.bands.windows(2).enumerate() {
            let (lo, hi) = (pair[0], pair[1]);
            // NaN bounds were already reported above
            if lo.bound.is_finite() && hi.bound.is_finite() && hi.bound <= lo.bound {
                errors.push(ValidationError::with_rule(
                    format!("bands[{}].bound", i + 1),
                    format!("{} does not exceed previous bound {}", hi.bound, lo.bound),
                    "strictly_increasing",
                ));
            }
            if hi.band < lo.band {
                errors.push(ValidationError::with_rule(
                    format!("bands[{}].band", i + 1),
                    format!("{} is less severe than previous band {}", hi.band, lo.band),
                    "non_decreasing_severity",
                ));
            }
        }

        errors
    }
}

// =============================================================================
// THRESHOLD TABLE
// =============================================================================

/// A validated magnitude → band table.
///
/// # Examples
///
/// ```
/// use riskband_config::{BoundMode, ThresholdTable};
/// use riskband_core::SeverityBand;
///
/// let table = ThresholdTable::correlation();
/// assert_eq!(table.band_for(0.8), SeverityBand::High);
/// assert_eq!(table.band_for(0.79999), SeverityBand::Moderate);
///
/// let exposure = ThresholdTable::exposure_significance();
/// assert_eq!(exposure.mode(), BoundMode::Exclusive);
/// assert_eq!(exposure.band_for(0.75), SeverityBand::Moderate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdTableSpec", into = "ThresholdTableSpec")]
pub struct ThresholdTable {
    mode: BoundMode,
    bands: Vec<Threshold>,
}

impl Default for ThresholdTable {
    /// The generic table: `≥0.8 High, ≥0.5 Moderate, ≥0.2 Low`.
    fn default() -> Self {
        Self::from_known(
            BoundMode::Inclusive,
            &[
                (0.2, SeverityBand::Low),
                (0.5, SeverityBand::Moderate),
                (0.8, SeverityBand::High),
            ],
        )
    }
}

impl ThresholdTable {
    /// Builds a table, rejecting entries that break the ordering rules.
    pub fn new(mode: BoundMode, bands: Vec<Threshold>) -> ConfigResult<Self> {
        ThresholdTableSpec { mode, bands }.try_into()
    }

    /// Builds a table from `(bound, band)` pairs.
    pub fn from_pairs(mode: BoundMode, pairs: &[(f64, SeverityBand)]) -> ConfigResult<Self> {
        Self::new(
            mode,
            pairs.iter().map(|&(b, band)| Threshold::new(b, band)).collect(),
        )
    }

    // Only for the built-in tables below, which are valid by construction.
    fn from_known(mode: BoundMode, pairs: &[(f64, SeverityBand)]) -> Self {
        Self {
            mode,
            bands: pairs.iter().map(|&(b, band)| Threshold::new(b, band)).collect(),
        }
    }

    /// Correlation risk: `≥0.8 High, ≥0.5 Moderate, ≥0.2 Low`.
    #[must_use]
    pub fn correlation() -> Self {
        Self::default()
    }

    /// Factor-exposure significance: `>0.75 High, >0.5 Moderate, >0.25 Low`.
    #[must_use]
    pub fn exposure_significance() -> Self {
        Self::from_known(
            BoundMode::Exclusive,
            &[
                (0.25, SeverityBand::Low),
                (0.5, SeverityBand::Moderate),
                (0.75, SeverityBand::High),
            ],
        )
    }

    /// Risk contribution in percent points: `>20 High, >15 Moderate, >10 Low`.
    #[must_use]
    pub fn risk_contribution() -> Self {
        Self::from_known(
            BoundMode::Exclusive,
            &[
                (10.0, SeverityBand::Low),
                (15.0, SeverityBand::Moderate),
                (20.0, SeverityBand::High),
            ],
        )
    }

    /// Beta: `>1.5 High, >1 Moderate, >0 Low`; only a zero beta is minimal.
    #[must_use]
    pub fn beta() -> Self {
        Self::from_known(
            BoundMode::Exclusive,
            &[
                (0.0, SeverityBand::Low),
                (1.0, SeverityBand::Moderate),
                (1.5, SeverityBand::High),
            ],
        )
    }

    /// Bound mode shared by all entries.
    #[must_use]
    pub fn mode(&self) -> BoundMode {
        self.mode
    }

    /// Entries in ascending bound order.
    #[must_use]
    pub fn bands(&self) -> &[Threshold] {
        &self.bands
    }

    /// Returns the band for a non-negative magnitude.
    ///
    /// Scans from the highest bound down and returns the first band whose
    /// bound admits `magnitude`; [`SeverityBand::Minimal`] if none does.
    #[must_use]
    pub fn band_for(&self, magnitude: f64) -> SeverityBand {
        self.bands
            .iter()
            .rev()
            .find(|t| self.mode.admits(magnitude, t.bound))
            .map_or(SeverityBand::Minimal, |t| t.band)
    }
}

impl TryFrom<ThresholdTableSpec> for ThresholdTable {
    type Error = ConfigError;

    fn try_from(spec: ThresholdTableSpec) -> ConfigResult<Self> {
        spec.validate_or_error()?;
        Ok(Self {
            mode: spec.mode,
            bands: spec.bands,
        })
    }
}

impl From<ThresholdTable> for ThresholdTableSpec {
    fn from(table: ThresholdTable) -> Self {
        Self {
            mode: table.mode,
            bands: table.bands,
        }
    }
}
