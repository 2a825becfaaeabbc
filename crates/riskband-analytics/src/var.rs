//! Value at Risk and Conditional Value at Risk.
//!
//! Both methods report losses as positive fractions of value: a 95% VaR of
//! `0.021` means returns fall below -2.1% on 5% of periods. A negative
//! figure means even the tail period is a gain.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{check_returns, mean, std_dev};

/// Default confidence level.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

// Quantile ranks within this distance of an integer snap to it.
const RANK_TOLERANCE: f64 = 1e-9;

/// Estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    /// Empirical quantile of the observed returns.
    Historical,
    /// Gaussian fit to the mean and population standard deviation.
    Parametric,
}

/// VaR and CVaR at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarEstimate {
    /// Method used.
    pub method: VarMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Value at Risk, as a positive loss fraction.
    pub var: f64,
    /// Expected loss beyond the VaR, as a positive loss fraction.
    pub cvar: f64,
}

/// Historical VaR: the negated `1 - c` quantile of the returns.
///
/// The quantile takes the higher of the two neighbouring observations, so
/// it is always an observed return.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidParameter`] for a confidence level outside `(0, 1)`
/// - [`AnalyticsError::EmptyInput`] / [`AnalyticsError::InvalidSample`] for a bad series
///
/// # Example
///
/// ```rust
/// use riskband_analytics::historical_var;
///
/// let returns = [-0.05, -0.03, 0.01, 0.02, 0.0, 0.015, -0.01, 0.005, 0.012, -0.002,
///                0.003, 0.007, -0.004, 0.009, 0.011, -0.006, 0.002, 0.004, 0.006, 0.001];
/// assert_eq!(historical_var(&returns, 0.95)?, 0.03);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn historical_var(returns: &[f64], confidence_level: f64) -> AnalyticsResult<f64> {
    check_confidence(confidence_level)?;
    check_returns(returns, "historical VaR")?;
    Ok(-tail_quantile(returns, 1.0 - confidence_level))
}

/// Historical CVaR: the negated mean of returns at or below the VaR quantile.
pub fn historical_cvar(returns: &[f64], confidence_level: f64) -> AnalyticsResult<f64> {
    check_confidence(confidence_level)?;
    check_returns(returns, "historical CVaR")?;
    let threshold = tail_quantile(returns, 1.0 - confidence_level);
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= threshold).collect();
    Ok(-mean(&tail))
}

/// Parametric VaR: `-(μ + z·σ)` with `z = Φ⁻¹(1 - c)`.
pub fn parametric_var(returns: &[f64], confidence_level: f64) -> AnalyticsResult<f64> {
    check_confidence(confidence_level)?;
    check_returns(returns, "parametric VaR")?;
    let normal = standard_normal()?;
    let z = normal.inverse_cdf(1.0 - confidence_level);
    Ok(-(mean(returns) + z * std_dev(returns, 0)))
}

/// Parametric CVaR: `-μ + σ·φ(z) / (1 - c)`.
pub fn parametric_cvar(returns: &[f64], confidence_level: f64) -> AnalyticsResult<f64> {
    check_confidence(confidence_level)?;
    check_returns(returns, "parametric CVaR")?;
    let normal = standard_normal()?;
    let alpha = 1.0 - confidence_level;
    let z = normal.inverse_cdf(alpha);
    Ok(-mean(returns) + std_dev(returns, 0) * normal.pdf(z) / alpha)
}

/// VaR and CVaR by one method.
pub fn estimate_var(
    returns: &[f64],
    confidence_level: f64,
    method: VarMethod,
) -> AnalyticsResult<VarEstimate> {
    let (var, cvar) = match method {
        VarMethod::Historical => (
            historical_var(returns, confidence_level)?,
            historical_cvar(returns, confidence_level)?,
        ),
        VarMethod::Parametric => (
            parametric_var(returns, confidence_level)?,
            parametric_cvar(returns, confidence_level)?,
        ),
    };

    log::debug!(
        "{:?} VaR at {:.1}% over {} returns: var={:.5}, cvar={:.5}",
        method,
        confidence_level * 100.0,
        returns.len(),
        var,
        cvar
    );

    Ok(VarEstimate {
        method,
        confidence_level,
        var,
        cvar,
    })
}

fn check_confidence(confidence_level: f64) -> AnalyticsResult<()> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(AnalyticsError::invalid_parameter(
            "confidence level",
            format!("must be in (0, 1), got {confidence_level}"),
        ));
    }
    Ok(())
}

fn standard_normal() -> AnalyticsResult<Normal> {
    Normal::new(0.0, 1.0).map_err(|err| {
        AnalyticsError::calculation_failed(format!(
            "failed to construct normal distribution: {err}"
        ))
    })
}

// Callers guarantee a non-empty, finite series.
fn tail_quantile(returns: &[f64], q: f64) -> f64 {
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = q * (sorted.len() - 1) as f64;
    let index = ((rank - RANK_TOLERANCE).ceil().max(0.0) as usize).min(sorted.len() - 1);
    sorted[index]
}
