//! Stress path summaries and price shocks.
//!
//! A stress path is a sequence of index levels (typically rebased to 100)
//! through a historical or hypothetical scenario. The summary reports the
//! largest peak-to-trough fall and how much of it the path regained.
//!
//! A price shock revalues a set of positions after moving some prices by a
//! relative amount (`-0.2` is a 20% fall).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A named sequence of index levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressPath {
    /// Scenario name.
    pub name: String,
    /// Index level per period.
    pub values: Vec<f64>,
}

impl StressPath {
    /// Creates a stress path.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Summarizes this path.
    pub fn summarize(&self) -> AnalyticsResult<StressSummary> {
        summarize_path(&self.name, &self.values)
    }
}

/// Drawdown statistics for one stress path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSummary {
    /// Scenario name.
    pub name: String,
    /// First level.
    pub start: f64,
    /// Lowest level of the largest drawdown.
    pub trough: f64,
    /// Period of `trough`.
    pub trough_index: usize,
    /// Last level.
    pub final_value: f64,
    /// Largest peak-to-trough fall, in index points.
    pub max_drawdown: f64,
    /// `max_drawdown` as a percentage of its peak.
    pub max_drawdown_pct: f64,
    /// Share of the drawdown regained by the final level, in `[0, 100]`.
    pub recovery_pct: f64,
    /// Number of periods in the path.
    pub periods: usize,
}

/// Summarizes a path of index levels.
///
/// # Errors
///
/// - [`AnalyticsError::EmptyInput`] for an empty path
/// - [`AnalyticsError::InvalidSample`] for a non-finite or non-positive level
///
/// # Example
///
/// ```rust
/// use riskband_analytics::summarize_path;
///
/// let s = summarize_path("2008 Financial Crisis", &[100.0, 85.0, 72.0, 68.0, 74.0, 82.0])?;
/// assert_eq!(s.max_drawdown, 32.0);
/// assert_eq!(s.trough_index, 3);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn summarize_path(name: &str, values: &[f64]) -> AnalyticsResult<StressSummary> {
    let (&start, _) = values
        .split_first()
        .ok_or_else(|| AnalyticsError::empty_input(format!("stress path '{name}'")))?;

    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(AnalyticsError::invalid_sample(format!(
            "stress path '{name}' has invalid level {bad}"
        )));
    }

    let mut peak = start;
    let mut worst_peak = start;
    let mut trough_index = 0;
    let mut max_drawdown = 0.0;
    for (i, &level) in values.iter().enumerate() {
        if level > peak {
            peak = level;
        }
        let drawdown = peak - level;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
            worst_peak = peak;
            trough_index = i;
        }
    }

    let trough = values[trough_index];
    let final_value = values[values.len() - 1];
    let recovery_pct = if max_drawdown > 0.0 {
        ((final_value - trough) / max_drawdown * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(StressSummary {
        name: name.to_string(),
        start,
        trough,
        trough_index,
        final_value,
        max_drawdown,
        max_drawdown_pct: max_drawdown / worst_peak * 100.0,
        recovery_pct,
        periods: values.len(),
    })
}

/// Summarizes every path, preserving order.
pub fn summarize_scenarios(paths: &[StressPath]) -> AnalyticsResult<Vec<StressSummary>> {
    paths.iter().map(StressPath::summarize).collect()
}

/// Summary of the path with the largest percentage drawdown (first wins ties).
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyInput`] when `paths` is empty, or the first
/// error from [`summarize_path`].
pub fn worst_scenario(paths: &[StressPath]) -> AnalyticsResult<StressSummary> {
    let mut worst: Option<StressSummary> = None;
    for summary in summarize_scenarios(paths)? {
        match &worst {
            Some(w) if summary.max_drawdown_pct <= w.max_drawdown_pct => {}
            _ => worst = Some(summary),
        }
    }
    let worst = worst.ok_or_else(|| AnalyticsError::empty_input("worst scenario"))?;
    log::debug!(
        "Worst of {} stress scenarios: {} ({:.1}%)",
        paths.len(),
        worst.name,
        worst.max_drawdown_pct
    );
    Ok(worst)
}

// =============================================================================
// PRICE SHOCKS
// =============================================================================

/// A position revalued under a price shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockPosition {
    /// Asset label, matched against shock keys.
    pub label: String,
    /// Latest price.
    pub price: f64,
    /// Units held; negative for a short position.
    pub quantity: f64,
}

impl ShockPosition {
    /// Creates a position.
    #[must_use]
    pub fn new(label: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            label: label.into(),
            price,
            quantity,
        }
    }

    /// Market value, `price × quantity`.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.price * self.quantity
    }

    fn validate(&self) -> AnalyticsResult<()> {
        if !self.price.is_finite() || self.price <= 0.0 || !self.quantity.is_finite() {
            return Err(AnalyticsError::invalid_sample(format!(
                "position '{}' has price {} and quantity {}",
                self.label, self.price, self.quantity
            )));
        }
        Ok(())
    }
}

/// Portfolio value before and after a price shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockImpact {
    /// Value at current prices.
    pub initial_value: f64,
    /// Value at shocked prices.
    pub shocked_value: f64,
    /// `(shocked - initial) / initial`.
    pub relative_change: f64,
    /// Shock keys that matched no position.
    pub unmatched: Vec<String>,
}

/// Positions with each shocked price multiplied by `1 + shock`.
///
/// Shocks naming no position are ignored; positions without a shock keep
/// their price.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidSample`] for a position with a
/// non-positive or non-finite price, or a shock that is non-finite or below
/// -100%.
pub fn apply_price_shock(
    positions: &[ShockPosition],
    shocks: &BTreeMap<String, f64>,
) -> AnalyticsResult<Vec<ShockPosition>> {
    check_shocks(shocks)?;
    positions
        .iter()
        .map(|p| {
            p.validate()?;
            let shock = shocks.get(&p.label).copied().unwrap_or(0.0);
            Ok(ShockPosition {
                price: p.price * (1.0 + shock),
                ..p.clone()
            })
        })
        .collect()
}

/// Relative change in portfolio value under a price shock.
///
/// # Errors
///
/// - [`AnalyticsError::EmptyInput`] for no positions
/// - [`AnalyticsError::DivisionByZero`] when the initial value is zero
/// - whatever [`apply_price_shock`] rejects
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use riskband_analytics::{shock_impact, ShockPosition};
///
/// let positions = vec![
///     ShockPosition::new("AAPL", 200.0, 10.0),
///     ShockPosition::new("TLT", 100.0, 20.0),
/// ];
/// let shocks = BTreeMap::from([("AAPL".to_string(), -0.2)]);
/// let impact = shock_impact(&positions, &shocks)?;
/// assert!((impact.relative_change + 0.1).abs() < 1e-12);
/// # Ok::<(), riskband_analytics::AnalyticsError>(())
/// ```
pub fn shock_impact(
    positions: &[ShockPosition],
    shocks: &BTreeMap<String, f64>,
) -> AnalyticsResult<ShockImpact> {
    if positions.is_empty() {
        return Err(AnalyticsError::empty_input("price shock"));
    }
    let shocked = apply_price_shock(positions, shocks)?;

    let initial_value: f64 = positions.iter().map(ShockPosition::value).sum();
    let shocked_value: f64 = shocked.iter().map(ShockPosition::value).sum();
    if initial_value == 0.0 {
        return Err(AnalyticsError::division_by_zero("price shock"));
    }

    let unmatched: Vec<String> = shocks
        .keys()
        .filter(|k| !positions.iter().any(|p| &p.label == *k))
        .cloned()
        .collect();
    if !unmatched.is_empty() {
        log::debug!("Price shock keys without a position: {:?}", unmatched);
    }

    Ok(ShockImpact {
        initial_value,
        shocked_value,
        relative_change: (shocked_value - initial_value) / initial_value,
        unmatched,
    })
}

fn check_shocks(shocks: &BTreeMap<String, f64>) -> AnalyticsResult<()> {
    for (label, shock) in shocks {
        if !shock.is_finite() || *shock < -1.0 {
            return Err(AnalyticsError::invalid_sample(format!(
                "shock for '{label}' is {shock}"
            )));
        }
    }
    Ok(())
}
