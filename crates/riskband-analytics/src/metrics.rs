//! Risk metrics over a series of periodic returns.
//!
//! Provides annualized statistics for one asset or portfolio return series:
//! - Volatility, Sharpe and Sortino ratios
//! - Maximum drawdown, CAGR and Calmar ratio
//! - Skewness and excess kurtosis
//! - Rolling volatility and rolling Sharpe ratio
//!
//! Returns are simple periodic returns (`0.01` is +1%). A return below -100%
//! is rejected, since the wealth curve would turn negative.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use riskband_core::{MetricKind, MetricSample};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default rolling window, in periods.
pub const DEFAULT_ROLLING_WINDOW: usize = 60;

/// Standard deviations below this are treated as zero dispersion.
pub(crate) const ZERO_DISPERSION: f64 = 1e-14;

/// Sampling frequency of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Trading days, 252 per year.
    #[default]
    Daily,
    /// 52 periods per year.
    Weekly,
    /// 12 periods per year.
    Monthly,
}

impl Frequency {
    /// Every frequency.
    pub const ALL: [Frequency; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Periods per year used to annualize.
    #[must_use]
    pub fn periods_per_year(self) -> f64 {
        match self {
            Self::Daily => 252.0,
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" => Ok(Self::Daily),
            "weekly" | "w" => Ok(Self::Weekly),
            "monthly" | "m" => Ok(Self::Monthly),
            other => Err(AnalyticsError::invalid_parameter(
                "frequency",
                format!("unsupported frequency '{other}'"),
            )),
        }
    }
}

// =============================================================================
// SINGLE-FIGURE METRICS
// =============================================================================

/// Annualized volatility: sample standard deviation × √periods.
///
/// # Errors
///
/// - [`AnalyticsError::EmptyInput`] / [`AnalyticsError::InvalidSample`] for a bad series
/// - [`AnalyticsError::InsufficientData`] for fewer than two returns
pub fn volatility(returns: &[f64], frequency: Frequency) -> AnalyticsResult<f64> {
    require(returns, 2, "volatility")?;
    Ok(std_dev(returns, 1) * frequency.periods_per_year().sqrt())
}

/// Annualized Sharpe ratio.
///
/// ## Formula
///
/// ```text
/// excess_t = r_t - rf / p
/// Sharpe   = mean(excess) × p / (std(excess) × √p)
/// ```
///
/// where `rf` is the annual risk-free rate and `p` the periods per year.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] for a series with no
/// dispersion, besides the series checks of [`volatility`].
///
/// # Example
///
/// ```rust
/// use riskband_analytics::{sharpe_ratio, Frequency};
///
/// let returns = [0.02, -0.01, 0.015, 0.005, -0.002, 0.01];
/// let sharpe = sharpe_ratio(&returns, 0.0, Frequency::Monthly)?;
/// assert!(sharpe > 0.0);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn sharpe_ratio(
    returns: &[f64],
    risk_free_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<f64> {
    require(returns, 2, "sharpe ratio")?;
    check_rate(risk_free_rate)?;
    window_sharpe(returns, risk_free_rate, frequency)
        .ok_or_else(|| AnalyticsError::division_by_zero("sharpe ratio"))
}

/// Annualized Sortino ratio.
///
/// The downside deviation is the population standard deviation of the
/// negative returns, annualized with √p.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] when there are no negative
/// returns or they have no dispersion.
pub fn sortino_ratio(
    returns: &[f64],
    risk_free_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<f64> {
    check_returns(returns, "sortino ratio")?;
    check_rate(risk_free_rate)?;

    let p = frequency.periods_per_year();
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if downside.is_empty() {
        return Err(AnalyticsError::division_by_zero("sortino ratio"));
    }
    let downside_deviation = std_dev(&downside, 0) * p.sqrt();
    if downside_deviation < ZERO_DISPERSION {
        return Err(AnalyticsError::division_by_zero("sortino ratio"));
    }

    Ok((mean(returns) - risk_free_rate / p) * p / downside_deviation)
}

/// Cumulative return after each period: `Π(1 + r) - 1`.
pub fn cumulative_returns(returns: &[f64]) -> AnalyticsResult<Vec<f64>> {
    check_returns(returns, "cumulative returns")?;
    let mut wealth = 1.0;
    Ok(returns
        .iter()
        .map(|r| {
            wealth *= 1.0 + r;
            wealth - 1.0
        })
        .collect())
}

/// Largest peak-to-trough fall of the wealth curve, as a fraction `<= 0`.
///
/// The curve starts at 1 before the first return, so a loss in the first
/// period counts as a drawdown.
pub fn max_drawdown(returns: &[f64]) -> AnalyticsResult<f64> {
    check_returns(returns, "max drawdown")?;
    let mut wealth = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;
    for r in returns {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        worst = worst.min((wealth - peak) / peak);
    }
    Ok(worst)
}

/// Compound annual growth rate: `(Π(1 + r))^(p / n) - 1`.
pub fn cagr(returns: &[f64], frequency: Frequency) -> AnalyticsResult<f64> {
    check_returns(returns, "cagr")?;
    let wealth: f64 = returns.iter().map(|r| 1.0 + r).product();
    Ok(wealth.powf(frequency.periods_per_year() / returns.len() as f64) - 1.0)
}

/// Calmar ratio: CAGR / |max drawdown|.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionByZero`] for a series that never draws
/// down.
pub fn calmar_ratio(returns: &[f64], frequency: Frequency) -> AnalyticsResult<f64> {
    let drawdown = max_drawdown(returns)?;
    if drawdown == 0.0 {
        return Err(AnalyticsError::division_by_zero("calmar ratio"));
    }
    Ok(cagr(returns, frequency)? / drawdown.abs())
}

/// Adjusted Fisher-Pearson sample skewness.
///
/// # Errors
///
/// - [`AnalyticsError::InsufficientData`] for fewer than three returns
/// - [`AnalyticsError::DivisionByZero`] for a constant series
pub fn skewness(returns: &[f64]) -> AnalyticsResult<f64> {
    require(returns, 3, "skewness")?;
    let n = returns.len() as f64;
    let (m2, m3, _) = central_moments(returns);
    if std_dev(returns, 0) < ZERO_DISPERSION {
        return Err(AnalyticsError::division_by_zero("skewness"));
    }
    Ok(n * (n - 1.0).sqrt() * m3 / ((n - 2.0) * m2.powf(1.5)))
}

/// Unbiased excess kurtosis (0 for a normal distribution).
///
/// # Errors
///
/// - [`AnalyticsError::InsufficientData`] for fewer than four returns
/// - [`AnalyticsError::DivisionByZero`] for a constant series
pub fn kurtosis(returns: &[f64]) -> AnalyticsResult<f64> {
    require(returns, 4, "kurtosis")?;
    let n = returns.len() as f64;
    let (m2, _, m4) = central_moments(returns);
    if std_dev(returns, 0) < ZERO_DISPERSION {
        return Err(AnalyticsError::division_by_zero("kurtosis"));
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * m4;
    let denominator = (n - 2.0) * (n - 3.0) * m2 * m2;
    let adjustment = 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0));
    Ok(numerator / denominator - adjustment)
}

// =============================================================================
// ROLLING METRICS
// =============================================================================

/// Annualized volatility over each full window.
///
/// The output has `returns.len() - window + 1` entries; entry `i` covers
/// `returns[i..i + window]`.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidParameter`] for a window below 2
/// - [`AnalyticsError::InsufficientData`] when the series is shorter than the window
pub fn rolling_volatility(
    returns: &[f64],
    window: usize,
    frequency: Frequency,
) -> AnalyticsResult<Vec<f64>> {
    check_window(window)?;
    require(returns, window, "rolling volatility")?;
    let scale = frequency.periods_per_year().sqrt();
    Ok(returns
        .windows(window)
        .map(|w| std_dev(w, 1) * scale)
        .collect())
}

/// Annualized Sharpe ratio over each full window.
///
/// A window with no dispersion yields `None`.
pub fn rolling_sharpe(
    returns: &[f64],
    window: usize,
    risk_free_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<Vec<Option<f64>>> {
    check_window(window)?;
    require(returns, window, "rolling sharpe")?;
    check_rate(risk_free_rate)?;
    Ok(returns
        .windows(window)
        .map(|w| window_sharpe(w, risk_free_rate, frequency))
        .collect())
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Every single-figure metric of a return series.
///
/// Ratios that are undefined for the series (no dispersion, no drawdown,
/// too few observations) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    /// Sampling frequency used to annualize.
    pub frequency: Frequency,
    /// Number of returns.
    pub observations: usize,
    /// Annualized volatility.
    pub volatility: f64,
    /// Annualized Sharpe ratio.
    pub sharpe: Option<f64>,
    /// Annualized Sortino ratio.
    pub sortino: Option<f64>,
    /// Maximum drawdown as a fraction `<= 0`.
    pub max_drawdown: f64,
    /// Compound annual growth rate.
    pub cagr: f64,
    /// Calmar ratio.
    pub calmar: Option<f64>,
    /// Sample skewness.
    pub skewness: Option<f64>,
    /// Excess kurtosis.
    pub kurtosis: Option<f64>,
}

impl ReturnSummary {
    /// Volatility, Sharpe and drawdown as classifiable samples for `label`.
    ///
    /// An undefined Sharpe ratio is omitted.
    pub fn to_samples(&self, label: &str) -> AnalyticsResult<Vec<MetricSample>> {
        let mut samples = vec![
            MetricSample::new(label, self.volatility, MetricKind::Volatility)?,
            MetricSample::new(label, self.max_drawdown, MetricKind::Drawdown)?,
        ];
        if let Some(sharpe) = self.sharpe {
            samples.push(MetricSample::new(label, sharpe, MetricKind::Sharpe)?);
        }
        Ok(samples)
    }
}

/// Computes every metric of a return series.
///
/// # Errors
///
/// Fails only for an invalid series or one with fewer than two returns;
/// undefined ratios become `None`.
///
/// # Example
///
/// ```rust
/// use riskband_analytics::{summarize_returns, Frequency};
///
/// let returns = [0.012, -0.008, 0.004, -0.015, 0.009, 0.011];
/// let summary = summarize_returns(&returns, 0.02, Frequency::Daily)?;
/// assert_eq!(summary.observations, 6);
/// assert!(summary.max_drawdown < 0.0);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn summarize_returns(
    returns: &[f64],
    risk_free_rate: f64,
    frequency: Frequency,
) -> AnalyticsResult<ReturnSummary> {
    require(returns, 2, "return summary")?;
    check_rate(risk_free_rate)?;

    let summary = ReturnSummary {
        frequency,
        observations: returns.len(),
        volatility: volatility(returns, frequency)?,
        sharpe: sharpe_ratio(returns, risk_free_rate, frequency).ok(),
        sortino: sortino_ratio(returns, risk_free_rate, frequency).ok(),
        max_drawdown: max_drawdown(returns)?,
        cagr: cagr(returns, frequency)?,
        calmar: calmar_ratio(returns, frequency).ok(),
        skewness: skewness(returns).ok(),
        kurtosis: kurtosis(returns).ok(),
    };

    log::debug!(
        "Summarized {} {} returns: vol={:.4}, mdd={:.4}",
        summary.observations,
        frequency,
        summary.volatility,
        summary.max_drawdown
    );

    Ok(summary)
}

// =============================================================================
// HELPERS
// =============================================================================

/// Checks a return series is non-empty, finite and above -100%.
pub(crate) fn check_returns(returns: &[f64], operation: &str) -> AnalyticsResult<()> {
    if returns.is_empty() {
        return Err(AnalyticsError::empty_input(operation));
    }
    for (i, r) in returns.iter().enumerate() {
        if !r.is_finite() {
            return Err(AnalyticsError::invalid_sample(format!(
                "{operation}: return {i} is {r}"
            )));
        }
        if *r < -1.0 {
            return Err(AnalyticsError::invalid_sample(format!(
                "{operation}: return {i} is {r}, below -100%"
            )));
        }
    }
    Ok(())
}

pub(crate) fn require(returns: &[f64], required: usize, operation: &str) -> AnalyticsResult<()> {
    check_returns(returns, operation)?;
    if returns.len() < required {
        return Err(AnalyticsError::insufficient_data(
            operation,
            required,
            returns.len(),
        ));
    }
    Ok(())
}

pub(crate) fn check_window(window: usize) -> AnalyticsResult<()> {
    if window < 2 {
        return Err(AnalyticsError::invalid_parameter(
            "window",
            format!("must be at least 2, got {window}"),
        ));
    }
    Ok(())
}

fn check_rate(risk_free_rate: f64) -> AnalyticsResult<()> {
    if !risk_free_rate.is_finite() {
        return Err(AnalyticsError::invalid_parameter(
            "risk-free rate",
            format!("must be finite, got {risk_free_rate}"),
        ));
    }
    Ok(())
}

pub(crate) fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
/// Callers guarantee `xs.len() > ddof`.
pub(crate) fn std_dev(xs: &[f64], ddof: usize) -> f64 {
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (xs.len() - ddof) as f64).sqrt()
}

// Sums of squared, cubed and fourth-power deviations.
fn central_moments(xs: &[f64]) -> (f64, f64, f64) {
    let m = mean(xs);
    xs.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), x| {
        let d = x - m;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    })
}

fn window_sharpe(returns: &[f64], risk_free_rate: f64, frequency: Frequency) -> Option<f64> {
    let p = frequency.periods_per_year();
    let sd = std_dev(returns, 1);
    if sd < ZERO_DISPERSION {
        return None;
    }
    Some((mean(returns) - risk_free_rate / p) * p / (sd * p.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MONTHLY: [f64; 6] = [0.02, -0.01, 0.03, -0.02, 0.01, 0.00];

    #[test]
    fn test_frequency() {
        assert_eq!(Frequency::Daily.periods_per_year(), 252.0);
        assert_eq!(Frequency::Weekly.periods_per_year(), 52.0);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12.0);
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("m".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!(matches!(
            "hourly".parse::<Frequency>(),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
        assert_eq!(Frequency::default(), Frequency::Daily);
    }

    #[test]
    fn test_volatility() {
        // mean 0.005, sum of squared deviations 0.00175
        let expected = (0.00175_f64 / 5.0).sqrt() * 12.0_f64.sqrt();
        assert_relative_eq!(
            volatility(&MONTHLY, Frequency::Monthly).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sharpe_ratio() {
        let sd = (0.00175_f64 / 5.0).sqrt();
        let expected = 0.005 * 12.0 / (sd * 12.0_f64.sqrt());
        assert_relative_eq!(
            sharpe_ratio(&MONTHLY, 0.0, Frequency::Monthly).unwrap(),
            expected,
            epsilon = 1e-9
        );

        // 6% annual risk-free is 0.5% a month, which cancels the mean
        assert_relative_eq!(
            sharpe_ratio(&MONTHLY, 0.06, Frequency::Monthly).unwrap(),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sharpe_without_dispersion() {
        assert_eq!(
            sharpe_ratio(&[0.01, 0.01, 0.01], 0.0, Frequency::Daily),
            Err(AnalyticsError::division_by_zero("sharpe ratio"))
        );
    }

    #[test]
    fn test_sortino_ratio() {
        // downside returns -0.01 and -0.02: population sd 0.005
        let expected = 0.005 * 12.0 / (0.005 * 12.0_f64.sqrt());
        assert_relative_eq!(
            sortino_ratio(&MONTHLY, 0.0, Frequency::Monthly).unwrap(),
            expected,
            epsilon = 1e-9
        );

        assert_eq!(
            sortino_ratio(&[0.01, 0.02], 0.0, Frequency::Daily),
            Err(AnalyticsError::division_by_zero("sortino ratio"))
        );
    }

    #[test]
    fn test_cumulative_and_drawdown() {
        let returns = [0.10, -0.20, 0.05];
        let cumulative = cumulative_returns(&returns).unwrap();
        assert_relative_eq!(cumulative[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(cumulative[1], -0.12, epsilon = 1e-12);
        assert_relative_eq!(cumulative[2], -0.076, epsilon = 1e-12);

        // peak 1.10, trough 0.88
        assert_relative_eq!(max_drawdown(&returns).unwrap(), -0.20, epsilon = 1e-12);

        // a first-period loss is a drawdown from the starting level
        assert_relative_eq!(max_drawdown(&[-0.05, 0.01]).unwrap(), -0.05, epsilon = 1e-12);
        assert_eq!(max_drawdown(&[0.01, 0.02]).unwrap(), 0.0);
    }

    #[test]
    fn test_cagr_and_calmar() {
        // twelve monthly returns of 1%
        let returns = [0.01; 12];
        assert_relative_eq!(
            cagr(&returns, Frequency::Monthly).unwrap(),
            1.01_f64.powi(12) - 1.0,
            epsilon = 1e-12
        );
        assert_eq!(
            calmar_ratio(&returns, Frequency::Monthly),
            Err(AnalyticsError::division_by_zero("calmar ratio"))
        );

        let returns = [0.10, -0.20, 0.05];
        let growth = (1.1_f64 * 0.8 * 1.05).powf(12.0 / 3.0) - 1.0;
        assert_relative_eq!(
            calmar_ratio(&returns, Frequency::Monthly).unwrap(),
            growth / 0.20,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_higher_moments() {
        // symmetric series has zero skew
        assert_relative_eq!(
            skewness(&[-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap(),
            0.0,
            epsilon = 1e-12
        );

        // [1, 2, 3, 10]: deviations -3, -2, -1, 6
        let xs = [1.0, 2.0, 3.0, 10.0];
        let (m2, m3, m4) = (50.0_f64, 180.0_f64, 1394.0_f64);
        let n = 4.0_f64;
        let skew = n * (n - 1.0).sqrt() * m3 / ((n - 2.0) * m2.powf(1.5));
        assert_relative_eq!(skewness(&xs).unwrap(), skew, epsilon = 1e-12);

        let kurt = n * (n + 1.0) * (n - 1.0) * m4 / ((n - 2.0) * (n - 3.0) * m2 * m2)
            - 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0));
        assert_relative_eq!(kurtosis(&xs).unwrap(), kurt, epsilon = 1e-12);
        assert!(kurt > 0.0);
    }

    #[test]
    fn test_moments_need_observations() {
        assert_eq!(
            skewness(&[0.01, 0.02]),
            Err(AnalyticsError::insufficient_data("skewness", 3, 2))
        );
        assert_eq!(
            kurtosis(&[0.01, 0.02, 0.03]),
            Err(AnalyticsError::insufficient_data("kurtosis", 4, 3))
        );
        assert!(matches!(
            kurtosis(&[0.01; 5]),
            Err(AnalyticsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_rolling_volatility() {
        let rolling = rolling_volatility(&MONTHLY, 3, Frequency::Monthly).unwrap();
        assert_eq!(rolling.len(), 4);
        assert_relative_eq!(
            rolling[0],
            volatility(&MONTHLY[0..3], Frequency::Monthly).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rolling[3],
            volatility(&MONTHLY[3..6], Frequency::Monthly).unwrap(),
            epsilon = 1e-12
        );

        assert!(matches!(
            rolling_volatility(&MONTHLY, 1, Frequency::Monthly),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
        assert_eq!(
            rolling_volatility(&MONTHLY, 10, Frequency::Monthly),
            Err(AnalyticsError::insufficient_data("rolling volatility", 10, 6))
        );
    }

    #[test]
    fn test_rolling_sharpe_marks_flat_windows() {
        let returns = [0.01, 0.01, 0.01, 0.03, -0.01];
        let rolling = rolling_sharpe(&returns, 3, 0.0, Frequency::Daily).unwrap();
        assert_eq!(rolling.len(), 3);
        assert_eq!(rolling[0], None);
        assert_relative_eq!(
            rolling[2].unwrap(),
            sharpe_ratio(&returns[2..5], 0.0, Frequency::Daily).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_series() {
        assert_eq!(
            volatility(&[], Frequency::Daily),
            Err(AnalyticsError::empty_input("volatility"))
        );
        assert!(matches!(
            max_drawdown(&[0.01, -1.5]),
            Err(AnalyticsError::InvalidSample { ref reason }) if reason.contains("-100%")
        ));
        assert!(cagr(&[0.01, f64::NAN], Frequency::Daily).is_err());
        assert!(matches!(
            sharpe_ratio(&MONTHLY, f64::INFINITY, Frequency::Monthly),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
        assert_eq!(
            volatility(&[0.01], Frequency::Daily),
            Err(AnalyticsError::insufficient_data("volatility", 2, 1))
        );
    }

    #[test]
    fn test_summary() {
        let summary = summarize_returns(&MONTHLY, 0.0, Frequency::Monthly).unwrap();
        assert_eq!(summary.observations, 6);
        assert_eq!(summary.frequency, Frequency::Monthly);
        assert_relative_eq!(
            summary.volatility,
            volatility(&MONTHLY, Frequency::Monthly).unwrap()
        );
        assert!(summary.sharpe.is_some());
        assert!(summary.sortino.is_some());
        assert!(summary.calmar.is_some());
        assert!(summary.max_drawdown < 0.0);

        let samples = summary.to_samples("Portfolio").unwrap();
        let kinds: Vec<_> = samples.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![MetricKind::Volatility, MetricKind::Drawdown, MetricKind::Sharpe]
        );
    }

    #[test]
    fn test_summary_leaves_undefined_ratios_empty() {
        let summary = summarize_returns(&[0.01, 0.02], 0.0, Frequency::Daily).unwrap();
        assert_eq!(summary.sortino, None);
        assert_eq!(summary.calmar, None);
        assert_eq!(summary.skewness, None);
        assert_eq!(summary.kurtosis, None);
        assert!(summary.sharpe.is_some());
    }
}
