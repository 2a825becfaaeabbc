//! Aggregation of weighted metric samples.
//!
//! Computes the summary figures shown beside a risk breakdown: total,
//! weighted average, dominant entry, top-N concentration and the
//! effective-positions diversification ratio.
//!
//! Sums run sequentially in input order, so identical input always gives a
//! bit-identical result. Values large enough that a sum or sum of squares
//! overflows `f64` are rejected with [`AnalyticsError::InvalidSample`]
//! rather than reported as an infinite or zero statistic.

use serde::{Deserialize, Serialize};

use riskband_core::MetricSample;

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Default number of entries summed for top-N concentration.
pub const DEFAULT_TOP_N: usize = 3;

/// Options for [`aggregate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Number of entries summed for top-N concentration.
    pub top_n: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AggregateOptions {
    /// Sets the top-N depth.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }
}

impl From<&AnalyticsConfig> for AggregateOptions {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            top_n: config.top_n,
        }
    }
}

/// Effective-positions diversification ratio.
///
/// `Unbounded` is the +∞ result of a collection whose values are all zero,
/// a legitimate zero-risk state rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiversificationRatio {
    /// A finite ratio.
    Finite(f64),
    /// Every value was zero.
    Unbounded,
}

impl DiversificationRatio {
    /// The ratio as a float; `f64::INFINITY` when unbounded.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Finite(v) => *v,
            Self::Unbounded => f64::INFINITY,
        }
    }

    /// The finite ratio, if any.
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Unbounded => None,
        }
    }

    /// Returns true for the all-zero sentinel.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

/// Summary statistics over a sample collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Signed sum of values.
    pub total: f64,

    /// `Σ(value · weight) / Σ weight`.
    pub weighted_average: f64,

    /// Sample with the largest absolute value (first one on ties).
    pub dominant: MetricSample,

    /// Depth used for `top_n_concentration` (after clamping).
    pub top_n: usize,

    /// Sum of the `top_n` largest absolute values.
    pub top_n_concentration: f64,

    /// `count / sqrt(Σ value² / 100)`.
    pub diversification_ratio: DiversificationRatio,

    /// Number of samples.
    pub count: usize,

    /// Sum of effective weights.
    pub total_weight: f64,

    magnitudes: Vec<f64>,
}

impl AggregateResult {
    /// Sum of the `n` largest absolute values; `n` is clamped to the count.
    #[must_use]
    pub fn concentration(&self, n: usize) -> f64 {
        self.magnitudes.iter().take(n).sum()
    }

    /// Absolute values in descending order.
    #[must_use]
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }
}

// =============================================================================
// AGGREGATE
// =============================================================================

/// Aggregates samples with default options (top 3 concentration).
///
/// # Errors
///
/// - [`AnalyticsError::EmptyInput`] for an empty slice
/// - [`AnalyticsError::InvalidSample`] for a non-finite value or bad weight,
///   or when an intermediate sum overflows
/// - [`AnalyticsError::DivisionByZero`] when every weight is zero
///
/// # Example
///
/// ```rust
/// use riskband_analytics::aggregate;
/// use riskband_core::{MetricKind, MetricSample};
///
/// let samples = vec![
///     MetricSample::new("AAPL", 18.2, MetricKind::RiskContribution)?.with_weight(22.5)?,
///     MetricSample::new("NVDA", 22.3, MetricKind::RiskContribution)?.with_weight(15.2)?,
/// ];
/// let result = aggregate(&samples)?;
/// assert_eq!(result.dominant.label, "NVDA");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate(samples: &[MetricSample]) -> AnalyticsResult<AggregateResult> {
    aggregate_with(samples, &AggregateOptions::default())
}

/// Aggregates samples with explicit options.
pub fn aggregate_with(
    samples: &[MetricSample],
    options: &AggregateOptions,
) -> AnalyticsResult<AggregateResult> {
    check_samples(samples, "aggregate")?;

    let total_weight = sum_weights(samples)?;
    let weighted_average = weighted_mean(samples, total_weight)?;
    let magnitudes = sorted_magnitudes(samples);
    let top_n = options.top_n.min(samples.len());
    let result = AggregateResult {
        total: sum_values(samples)?,
        weighted_average,
        dominant: max_magnitude(samples).clone(),
        top_n,
        top_n_concentration: finite(magnitudes.iter().take(top_n).sum(), "concentration")?,
        diversification_ratio: effective_positions(samples)?,
        count: samples.len(),
        total_weight,
        magnitudes,
    };

    log::debug!(
        "Aggregated {} samples: total={:.4}, weighted_avg={:.4}, dominant={}",
        result.count,
        result.total,
        result.weighted_average,
        result.dominant.label
    );

    Ok(result)
}

// =============================================================================
// INDIVIDUAL STATISTICS
// =============================================================================

/// Signed sum of values.
pub fn total(samples: &[MetricSample]) -> AnalyticsResult<f64> {
    check_samples(samples, "total")?;
    sum_values(samples)
}

/// Weighted average of values; weights default to 1.
pub fn weighted_average(samples: &[MetricSample]) -> AnalyticsResult<f64> {
    check_samples(samples, "weighted average")?;
    weighted_mean(samples, sum_weights(samples)?)
}

/// Sample with the largest absolute value; the first one wins ties.
pub fn dominant(samples: &[MetricSample]) -> AnalyticsResult<&MetricSample> {
    check_samples(samples, "dominant")?;
    Ok(max_magnitude(samples))
}

/// Sum of the `n` largest absolute values, `n` clamped to `[0, len]`.
pub fn top_n_concentration(samples: &[MetricSample], n: usize) -> AnalyticsResult<f64> {
    check_samples(samples, "top-n concentration")?;
    finite(sorted_magnitudes(samples).iter().take(n).sum(), "concentration")
}

/// Sum of the first `n` signed values in input order.
///
/// This is the "top N" figure of a list that is already presented in
/// ranking order.
pub fn leading_concentration(samples: &[MetricSample], n: usize) -> AnalyticsResult<f64> {
    check_samples(samples, "leading concentration")?;
    finite(
        samples.iter().take(n).map(|s| s.value).sum(),
        "leading concentration",
    )
}

/// `count / sqrt(Σ value² / 100)`, or `Unbounded` when all values are zero.
pub fn diversification_ratio(samples: &[MetricSample]) -> AnalyticsResult<DiversificationRatio> {
    check_samples(samples, "diversification ratio")?;
    effective_positions(samples)
}

// =============================================================================
// HELPERS
// =============================================================================

fn check_samples(samples: &[MetricSample], operation: &str) -> AnalyticsResult<()> {
    if samples.is_empty() {
        return Err(AnalyticsError::empty_input(operation));
    }
    for s in samples {
        s.validate()?;
    }
    Ok(())
}

fn finite(value: f64, quantity: &str) -> AnalyticsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::invalid_sample(format!(
            "{quantity} overflows f64"
        )))
    }
}

fn sum_values(samples: &[MetricSample]) -> AnalyticsResult<f64> {
    finite(samples.iter().map(|s| s.value).sum(), "total")
}

fn sum_weights(samples: &[MetricSample]) -> AnalyticsResult<f64> {
    finite(
        samples.iter().map(MetricSample::effective_weight).sum(),
        "total weight",
    )
}

fn weighted_mean(samples: &[MetricSample], total_weight: f64) -> AnalyticsResult<f64> {
    if total_weight == 0.0 {
        return Err(AnalyticsError::division_by_zero("weighted average"));
    }
    let weighted = finite(
        samples
            .iter()
            .map(|s| s.value * s.effective_weight())
            .sum(),
        "weighted sum",
    )?;
    Ok(weighted / total_weight)
}

// Callers guarantee a non-empty slice.
fn max_magnitude(samples: &[MetricSample]) -> &MetricSample {
    let mut best = &samples[0];
    for s in &samples[1..] {
        if s.magnitude() > best.magnitude() {
            best = s;
        }
    }
    best
}

fn sorted_magnitudes(samples: &[MetricSample]) -> Vec<f64> {
    let mut magnitudes: Vec<f64> = samples.iter().map(MetricSample::magnitude).collect();
    magnitudes.sort_by(|a, b| b.total_cmp(a));
    magnitudes
}

fn effective_positions(samples: &[MetricSample]) -> AnalyticsResult<DiversificationRatio> {
    let sum_sq = finite(
        samples.iter().map(|s| s.value * s.value).sum(),
        "sum of squares",
    )?;
    if sum_sq == 0.0 {
        return Ok(DiversificationRatio::Unbounded);
    }
    Ok(DiversificationRatio::Finite(
        samples.len() as f64 / (sum_sq / 100.0).sqrt(),
    ))
}
