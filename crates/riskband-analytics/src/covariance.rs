//! Covariance of asset returns and portfolio risk decomposition.
//!
//! ## Formulas
//!
//! ```text
//! σ²_p   = wᵀ Σ w
//! MCTR_i = (Σ w)_i / σ_p
//! CCTR_i = w_i × MCTR_i
//! %_i    = 100 × CCTR_i / σ_p
//! ```
//!
//! Component contributions sum to `σ_p`, so the percentages sum to 100.

use serde::Serialize;

use riskband_core::{MetricKind, MetricSample};

use crate::correlation::CorrelationMatrix;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{check_returns, check_window, mean, Frequency, ZERO_DISPERSION};

const TOLERANCE: f64 = 1e-12;

/// A square, symmetric covariance matrix with non-negative variances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// One asset's share of portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskContribution {
    /// Asset label.
    pub label: String,
    /// Portfolio weight as a fraction.
    pub weight: f64,
    /// Marginal contribution to risk.
    pub marginal: f64,
    /// Component contribution to risk, `weight × marginal`.
    pub component: f64,
    /// Component as a percentage of portfolio volatility.
    pub percent: f64,
}

impl RiskContribution {
    /// The contribution as a risk-contribution sample weighted by allocation
    /// in percent, the shape the aggregator and dashboard expect.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidSample`] for a short (negative) weight.
    pub fn to_sample(&self) -> AnalyticsResult<MetricSample> {
        Ok(
            MetricSample::new(self.label.clone(), self.percent, MetricKind::RiskContribution)?
                .with_weight(self.weight * 100.0)?,
        )
    }
}

impl CovarianceMatrix {
    /// Creates a matrix after checking its shape and entries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidMatrix`] if the matrix is not square,
    /// the label count differs from the row count, an entry is non-finite,
    /// a variance is negative, or the matrix is not symmetric.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<f64>>) -> AnalyticsResult<Self> {
        let n = rows.len();
        if labels.len() != n {
            return Err(AnalyticsError::invalid_matrix(format!(
                "{} labels for {} covariance rows",
                labels.len(),
                n
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AnalyticsError::invalid_matrix(format!(
                    "covariance row '{}' has {} entries, expected {}",
                    labels[i],
                    row.len(),
                    n
                )));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(AnalyticsError::invalid_matrix(format!(
                    "covariance row '{}' has non-finite entry {}",
                    labels[i], bad
                )));
            }
            if row[i] < 0.0 {
                return Err(AnalyticsError::invalid_matrix(format!(
                    "variance of '{}' is negative",
                    labels[i]
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let scale = rows[i][j].abs().max(rows[j][i].abs()).max(1.0);
                if (rows[i][j] - rows[j][i]).abs() > TOLERANCE * scale {
                    return Err(AnalyticsError::invalid_matrix(format!(
                        "covariance not symmetric at ({}, {})",
                        labels[i], labels[j]
                    )));
                }
            }
        }
        Ok(Self { labels, rows })
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

    /// Covariance between two assets by label.
    #[must_use]
    pub fn get(&self, left: &str, right: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == left)?;
        let j = self.labels.iter().position(|l| l == right)?;
        Some(self.rows[i][j])
    }

    /// Standard deviation of each asset, in row order.
    #[must_use]
    pub fn volatilities(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.rows[i][i].sqrt()).collect()
    }

    /// The matrix scaled by the periods per year of `frequency`.
    #[must_use]
    pub fn annualized(&self, frequency: Frequency) -> Self {
        let p = frequency.periods_per_year();
        Self {
            labels: self.labels.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|v| v * p).collect())
                .collect(),
        }
    }

    /// Correlation matrix implied by this covariance.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DivisionByZero`] when an asset has zero
    /// variance.
    pub fn to_correlation(&self) -> AnalyticsResult<CorrelationMatrix> {
        let vols = self.volatilities();
        if let Some(i) = vols.iter().position(|v| *v < ZERO_DISPERSION) {
            return Err(AnalyticsError::division_by_zero(format!(
                "correlation of '{}'",
                self.labels[i]
            )));
        }

        let n = self.len();
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            (self.rows[i][j] / (vols[i] * vols[j])).clamp(-1.0, 1.0)
                        }
                    })
                    .collect()
            })
            .collect();
        CorrelationMatrix::new(self.labels.clone(), rows)
    }

    /// Portfolio variance `wᵀ Σ w`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidParameter`] when the weights do not
    /// match the assets or are non-finite.
    pub fn portfolio_variance(&self, weights: &[f64]) -> AnalyticsResult<f64> {
        let sigma_w = self.times(weights)?;
        Ok(weights.iter().zip(&sigma_w).map(|(w, s)| w * s).sum())
    }

    /// Portfolio volatility `√(wᵀ Σ w)`.
    pub fn portfolio_volatility(&self, weights: &[f64]) -> AnalyticsResult<f64> {
        Ok(self.portfolio_variance(weights)?.max(0.0).sqrt())
    }

    /// Marginal and component contribution of each asset to portfolio
    /// volatility, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DivisionByZero`] for a zero-volatility
    /// portfolio, besides the weight checks of [`Self::portfolio_variance`].
    pub fn risk_contributions(&self, weights: &[f64]) -> AnalyticsResult<Vec<RiskContribution>> {
        let sigma_w = self.times(weights)?;
        let variance: f64 = weights.iter().zip(&sigma_w).map(|(w, s)| w * s).sum();
        let volatility = variance.max(0.0).sqrt();
        if volatility < ZERO_DISPERSION {
            return Err(AnalyticsError::division_by_zero("risk contribution"));
        }

        let contributions: Vec<RiskContribution> = self
            .labels
            .iter()
            .zip(weights.iter().zip(&sigma_w))
            .map(|(label, (w, s))| {
                let marginal = s / volatility;
                let component = w * marginal;
                RiskContribution {
                    label: label.clone(),
                    weight: *w,
                    marginal,
                    component,
                    percent: 100.0 * component / volatility,
                }
            })
            .collect();

        log::debug!(
            "Decomposed volatility {:.6} over {} assets",
            volatility,
            contributions.len()
        );

        Ok(contributions)
    }

    fn times(&self, weights: &[f64]) -> AnalyticsResult<Vec<f64>> {
        if weights.len() != self.len() {
            return Err(AnalyticsError::invalid_parameter(
                "weights",
                format!("{} weights for {} assets", weights.len(), self.len()),
            ));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite()) {
            return Err(AnalyticsError::invalid_parameter(
                "weights",
                format!("non-finite weight {bad}"),
            ));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.iter().zip(weights).map(|(c, w)| c * w).sum())
            .collect())
    }
}

/// Sample covariance (`n - 1` denominator) of equally long return series.
///
/// # Errors
///
/// - [`AnalyticsError::EmptyInput`] for no series
/// - [`AnalyticsError::InvalidMatrix`] when labels and series differ in count
///   or the series differ in length
/// - [`AnalyticsError::InsufficientData`] for fewer than two observations
/// - [`AnalyticsError::InvalidSample`] for a non-finite return or one below -100%
pub fn covariance_matrix(
    labels: Vec<String>,
    series: &[Vec<f64>],
) -> AnalyticsResult<CovarianceMatrix> {
    let Some(first) = series.first() else {
        return Err(AnalyticsError::empty_input("covariance matrix"));
    };
    if labels.len() != series.len() {
        return Err(AnalyticsError::invalid_matrix(format!(
            "{} labels for {} return series",
            labels.len(),
            series.len()
        )));
    }
    let observations = first.len();
    for (label, returns) in labels.iter().zip(series) {
        if returns.len() != observations {
            return Err(AnalyticsError::invalid_matrix(format!(
                "series '{}' has {} returns, expected {}",
                label,
                returns.len(),
                observations
            )));
        }
        check_returns(returns, &format!("covariance of '{label}'"))?;
    }
    if observations < 2 {
        return Err(AnalyticsError::insufficient_data(
            "covariance matrix",
            2,
            observations,
        ));
    }

    let means: Vec<f64> = series.iter().map(|s| mean(s)).collect();
    let n = series.len();
    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let cov = co_moment(&series[i], means[i], &series[j], means[j])
                / (observations - 1) as f64;
            rows[i][j] = cov;
            rows[j][i] = cov;
        }
    }
    CovarianceMatrix::new(labels, rows)
}

/// Pearson correlation of two series over each full window.
///
/// A window where either series is flat yields `None`.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidParameter`] for a window below 2 or series of
///   different lengths
/// - [`AnalyticsError::InsufficientData`] when the series are shorter than the window
pub fn rolling_correlation(
    left: &[f64],
    right: &[f64],
    window: usize,
) -> AnalyticsResult<Vec<Option<f64>>> {
    check_window(window)?;
    if left.len() != right.len() {
        return Err(AnalyticsError::invalid_parameter(
            "series",
            format!("lengths differ: {} and {}", left.len(), right.len()),
        ));
    }
    check_returns(left, "rolling correlation")?;
    check_returns(right, "rolling correlation")?;
    if left.len() < window {
        return Err(AnalyticsError::insufficient_data(
            "rolling correlation",
            window,
            left.len(),
        ));
    }

    Ok(left
        .windows(window)
        .zip(right.windows(window))
        .map(|(x, y)| pearson(x, y))
        .collect())
}

fn co_moment(x: &[f64], mx: f64, y: &[f64], my: f64) -> f64 {
    x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum()
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let (mx, my) = (mean(x), mean(y));
    let sxx = co_moment(x, mx, x, mx);
    let syy = co_moment(y, my, y, my);
    let (sx, sy) = (sxx.sqrt(), syy.sqrt());
    if sx < ZERO_DISPERSION || sy < ZERO_DISPERSION {
        return None;
    }
    Some((co_moment(x, mx, y, my) / (sx * sy)).clamp(-1.0, 1.0))
}
