//! Correlation matrix summary.
//!
//! Walks the upper triangle of a validated correlation matrix and
//! classifies every pair with the correlation threshold table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use riskband_core::{MetricKind, SeverityBand};

use crate::classify::{count_by_band, SeverityMapper};
use crate::covariance::covariance_matrix;
use crate::error::{AnalyticsError, AnalyticsResult};

const TOLERANCE: f64 = 1e-9;

/// A square, symmetric matrix of pairwise correlations with unit diagonal.
///
/// Deserialization goes through [`CorrelationMatrix::new`], so a loaded
/// matrix satisfies the same invariants as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CorrelationMatrixSpec", into = "CorrelationMatrixSpec")]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Unvalidated correlation matrix, as stored in documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrixSpec {
    /// Asset labels in row order.
    pub labels: Vec<String>,
    /// Matrix rows.
    pub rows: Vec<Vec<f64>>,
}

impl TryFrom<CorrelationMatrixSpec> for CorrelationMatrix {
    type Error = AnalyticsError;

    fn try_from(spec: CorrelationMatrixSpec) -> AnalyticsResult<Self> {
        Self::new(spec.labels, spec.rows)
    }
}

impl From<CorrelationMatrix> for CorrelationMatrixSpec {
    fn from(matrix: CorrelationMatrix) -> Self {
        Self {
            labels: matrix.labels,
            rows: matrix.rows,
        }
    }
}

/// One off-diagonal entry of a correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    /// Row asset.
    pub left: String,
    /// Column asset.
    pub right: String,
    /// Correlation coefficient.
    pub value: f64,
}

impl CorrelationPair {
    /// Direction and strength, e.g. `"Positive Correlation: 0.850"`.
    #[must_use]
    pub fn describe(&self) -> String {
        let direction = if self.value > 0.0 {
            "Positive"
        } else {
            "Negative"
        };
        format!("{direction} Correlation: {:.3}", self.value.abs())
    }
}

/// Summary of every pair in a matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    /// Number of distinct pairs, `n(n-1)/2`.
    pub pair_count: usize,
    /// Mean absolute correlation over the pairs.
    pub average_abs: f64,
    /// Pair with the largest absolute correlation (first wins ties).
    pub strongest: CorrelationPair,
    /// Pairs per severity band; every band present.
    pub band_counts: BTreeMap<SeverityBand, usize>,
}

impl CorrelationMatrix {
    /// Creates a matrix after checking its shape and entries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidMatrix`] if the matrix is not square,
    /// the label count differs from the row count, any entry is non-finite
    /// or outside `[-1, 1]`, the diagonal is not 1, or the matrix is not
    /// symmetric.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<f64>>) -> AnalyticsResult<Self> {
        let n = rows.len();
        if labels.len() != n {
            return Err(AnalyticsError::invalid_matrix(format!(
                "{} labels for {} rows",
                labels.len(),
                n
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AnalyticsError::invalid_matrix(format!(
                    "row '{}' has {} entries, expected {}",
                    labels[i],
                    row.len(),
                    n
                )));
            }
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() || value.abs() > 1.0 + TOLERANCE {
                    return Err(AnalyticsError::invalid_matrix(format!(
                        "entry ({}, {}) = {} is outside [-1, 1]",
                        labels[i], labels[j], value
                    )));
                }
            }
            if (row[i] - 1.0).abs() > TOLERANCE {
                return Err(AnalyticsError::invalid_matrix(format!(
                    "diagonal entry for '{}' is {}, expected 1",
                    labels[i], row[i]
                )));
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if (rows[i][j] - rows[j][i]).abs() > TOLERANCE {
                    return Err(AnalyticsError::invalid_matrix(format!(
                        "not symmetric at ({}, {})",
                        labels[i], labels[j]
                    )));
                }
            }
        }

        Ok(Self { labels, rows })
    }

    /// Pearson correlation of equally long return series.
    ///
    /// # Errors
    ///
    /// Whatever [`covariance_matrix`] rejects, or
    /// [`AnalyticsError::DivisionByZero`] for a series with no dispersion.
    pub fn from_returns(labels: Vec<String>, series: &[Vec<f64>]) -> AnalyticsResult<Self> {
        covariance_matrix(labels, series)?.to_correlation()
    }

    /// Asset labels in row order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the matrix has no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Correlation between two assets by label.
    #[must_use]
    pub fn get(&self, left: &str, right: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == left)?;
        let j = self.labels.iter().position(|l| l == right)?;
        Some(self.rows[i][j])
    }

    /// Upper-triangle pairs in row-major order.
    #[must_use]
    pub fn pairs(&self) -> Vec<CorrelationPair> {
        let n = self.len();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push(CorrelationPair {
                    left: self.labels[i].clone(),
                    right: self.labels[j].clone(),
                    value: self.rows[i][j],
                });
            }
        }
        pairs
    }

    /// Summarizes every pair.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyInput`] for fewer than two assets, or
    /// whatever `mapper` returns for the correlation kind.
    pub fn summarize(&self, mapper: &SeverityMapper) -> AnalyticsResult<CorrelationSummary> {
        let pairs = self.pairs();
        let Some(first) = pairs.first() else {
            return Err(AnalyticsError::empty_input("correlation summary"));
        };

        let mut strongest = first;
        let mut abs_sum = 0.0;
        let mut bands = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            abs_sum += pair.value.abs();
            if pair.value.abs() > strongest.value.abs() {
                strongest = pair;
            }
            bands.push(mapper.classify(pair.value, MetricKind::Correlation)?);
        }

        let summary = CorrelationSummary {
            pair_count: pairs.len(),
            average_abs: abs_sum / pairs.len() as f64,
            strongest: strongest.clone(),
            band_counts: count_by_band(bands),
        };

        log::debug!(
            "Summarized {} correlation pairs, strongest {}/{}",
            summary.pair_count,
            summary.strongest.left,
            summary.strongest.right
        );

        Ok(summary)
    }
}
