//! Severity mapping.
//!
//! Turns a metric value into a [`SeverityBand`] using the threshold table
//! registered for its [`MetricKind`]. Only the magnitude matters, so a value
//! and its negation always land in the same band.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use riskband_config::ThresholdRegistry;
use riskband_core::{MetricKind, MetricSample, SeverityBand, Sign};

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::parallel::maybe_parallel_map;

static STANDARD: Lazy<SeverityMapper> = Lazy::new(SeverityMapper::standard);

/// A sample together with its band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSample {
    /// Sample label.
    pub label: String,
    /// Raw value.
    pub value: f64,
    /// Metric kind.
    pub kind: MetricKind,
    /// Severity of `abs(value)`.
    pub band: SeverityBand,
    /// Direction of `value`.
    pub sign: Sign,
}

/// Classifies values against a [`ThresholdRegistry`].
///
/// # Example
///
/// ```rust
/// use riskband_analytics::SeverityMapper;
/// use riskband_core::{MetricKind, SeverityBand};
///
/// let mapper = SeverityMapper::standard();
/// assert_eq!(mapper.classify(0.91, MetricKind::Exposure)?, SeverityBand::High);
/// assert_eq!(mapper.classify(-0.25, MetricKind::Correlation)?, SeverityBand::Low);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityMapper {
    registry: ThresholdRegistry,
}

impl Default for SeverityMapper {
    fn default() -> Self {
        Self::standard()
    }
}

impl SeverityMapper {
    /// Creates a mapper over the given registry.
    #[must_use]
    pub fn new(registry: ThresholdRegistry) -> Self {
        Self { registry }
    }

    /// Creates a mapper over [`ThresholdRegistry::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ThresholdRegistry::standard())
    }

    /// Shared mapper over the standard registry.
    #[must_use]
    pub fn shared() -> &'static SeverityMapper {
        &STANDARD
    }

    /// The registry this mapper classifies with.
    #[must_use]
    pub fn registry(&self) -> &ThresholdRegistry {
        &self.registry
    }

    /// Classifies a single value.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::InvalidSample`] if `value` is NaN or infinite
    /// - [`AnalyticsError::UnknownMetricKind`] if the registry has no table
    ///   for `kind` and no fallback
    pub fn classify(&self, value: f64, kind: MetricKind) -> AnalyticsResult<SeverityBand> {
        if !value.is_finite() {
            return Err(AnalyticsError::invalid_sample(format!(
                "cannot classify non-finite {kind} value {value}"
            )));
        }

        let table = self
            .registry
            .table_for(kind)
            .ok_or(AnalyticsError::UnknownMetricKind { kind })?;

        if !self.registry.is_registered(kind) {
            log::trace!("No table registered for {}, using fallback", kind);
        }

        Ok(table.band_for(value.abs()))
    }

    /// Validates and classifies a sample.
    pub fn classify_sample(&self, sample: &MetricSample) -> AnalyticsResult<ClassifiedSample> {
        sample.validate()?;
        let band = self.classify(sample.value, sample.kind)?;
        Ok(ClassifiedSample {
            label: sample.label.clone(),
            value: sample.value,
            kind: sample.kind,
            band,
            sign: Sign::of(sample.value),
        })
    }

    /// Classifies every sample, preserving input order.
    ///
    /// Fails on the first invalid sample (in input order).
    pub fn classify_all(
        &self,
        samples: &[MetricSample],
        config: &AnalyticsConfig,
    ) -> AnalyticsResult<Vec<ClassifiedSample>> {
        maybe_parallel_map(samples, config, |s| self.classify_sample(s))
            .into_iter()
            .collect()
    }
}

/// Classifies a value with the standard registry.
///
/// # Example
///
/// ```rust
/// use riskband_analytics::classify;
/// use riskband_core::{MetricKind, SeverityBand};
///
/// assert_eq!(classify(0.8, MetricKind::Correlation)?, SeverityBand::High);
/// assert_eq!(classify(0.79999, MetricKind::Correlation)?, SeverityBand::Moderate);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn classify(value: f64, kind: MetricKind) -> AnalyticsResult<SeverityBand> {
    SeverityMapper::shared().classify(value, kind)
}

/// Counts bands, with an entry (possibly zero) for every band.
#[must_use]
pub fn count_by_band<I>(bands: I) -> BTreeMap<SeverityBand, usize>
where
    I: IntoIterator<Item = SeverityBand>,
{
    let mut counts: BTreeMap<SeverityBand, usize> =
        SeverityBand::ALL.iter().map(|b| (*b, 0)).collect();
    for band in bands {
        *counts.entry(band).or_insert(0) += 1;
    }
    counts
}
