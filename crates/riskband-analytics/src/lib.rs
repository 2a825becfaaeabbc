//! # riskband Analytics
//!
//! Severity classification and aggregation of portfolio risk metrics.
//!
//! This crate turns raw metric values into discrete severity bands, summarizes
//! weighted sample collections, and resolves bands to the colors and labels a
//! presentation layer renders.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every calculation is stateless with explicit inputs
//! - **Configurable thresholds**: Tables come from a [`ThresholdRegistry`],
//!   loadable from TOML or JSON through `riskband-config`
//! - **Deterministic aggregation**: Sums run sequentially in input order
//! - **Config-driven parallelism**: Optional rayon support for bulk
//!   classification with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use riskband_analytics::prelude::*;
//!
//! let samples = vec![
//!     MetricSample::new("AAPL", 18.2, MetricKind::RiskContribution)?.with_weight(22.5)?,
//!     MetricSample::new("NVDA", 22.3, MetricKind::RiskContribution)?.with_weight(15.2)?,
//!     MetricSample::new("GLD", 5.2, MetricKind::RiskContribution)?.with_weight(13.0)?,
//! ];
//!
//! let result = aggregate(&samples)?;
//! assert_eq!(result.dominant.label, "NVDA");
//!
//! let band = classify(result.dominant.value, MetricKind::RiskContribution)?;
//! assert_eq!(band, SeverityBand::High);
//!
//! let shown = resolve(band, Sign::of(result.dominant.value), &Palette::Correlation);
//! assert_eq!(shown.color, ColorToken::Red);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`classify`](mod@classify) - Severity mapping through threshold tables
//! - [`aggregate`](mod@aggregate) - Totals, weighted average, concentration, diversification
//! - [`resolve`](mod@resolve) - Color/label resolution and signed formatting
//! - [`correlation`](mod@correlation) - Correlation matrix summaries
//! - [`covariance`](mod@covariance) - Covariance matrices and risk decomposition
//! - [`attribution`](mod@attribution) - Risk contribution vs allocation, benchmark deviation
//! - [`metrics`](mod@metrics) - Volatility, Sharpe, Sortino, drawdown and rolling metrics
//! - [`var`](mod@var) - Historical and parametric VaR/CVaR
//! - [`regime`](mod@regime) - Volatility regimes and rolling z-scores
//! - [`stress`](mod@stress) - Stress path drawdown summaries and price shocks
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel classification for large inputs

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod aggregate;
pub mod attribution;
pub mod classify;
pub mod config;
pub mod correlation;
pub mod covariance;
pub mod error;
pub mod metrics;
pub mod parallel;
pub mod regime;
pub mod resolve;
pub mod stress;
pub mod var;

pub use error::{AnalyticsError, AnalyticsResult};

pub use aggregate::{
    aggregate, aggregate_with, diversification_ratio, dominant, leading_concentration,
    top_n_concentration, total, weighted_average, AggregateOptions, AggregateResult,
    DiversificationRatio, DEFAULT_TOP_N,
};
pub use attribution::{
    allocation_risk_level, attribute, benchmark_deviation, excess_risk, AllocationAttribution,
    AllocationRiskLevel, FactorDeviation, NEAR_BENCHMARK_TOLERANCE,
};
pub use classify::{classify, count_by_band, ClassifiedSample, SeverityMapper};
pub use config::AnalyticsConfig;
pub use correlation::{
    CorrelationMatrix, CorrelationMatrixSpec, CorrelationPair, CorrelationSummary,
};
pub use covariance::{covariance_matrix, rolling_correlation, CovarianceMatrix, RiskContribution};
pub use metrics::{
    cagr, calmar_ratio, cumulative_returns, kurtosis, max_drawdown, rolling_sharpe,
    rolling_volatility, sharpe_ratio, skewness, sortino_ratio, summarize_returns, volatility,
    Frequency, ReturnSummary, DEFAULT_ROLLING_WINDOW,
};
pub use parallel::maybe_parallel_map;
pub use resolve::{
    describe, format_plain, format_signed, resolve, DisplayFormat, Presentation, Resolution,
    FALLBACK_LABEL, FALLBACK_SYMBOL,
};
pub use regime::{
    detect_volatility_regime, rolling_z_scores, volatility_regimes, RegimeThresholds,
    VolatilityRegime,
};
pub use stress::{
    apply_price_shock, shock_impact, summarize_path, summarize_scenarios, worst_scenario,
    ShockImpact, ShockPosition, StressPath, StressSummary,
};
pub use var::{
    estimate_var, historical_cvar, historical_var, parametric_cvar, parametric_var, VarEstimate,
    VarMethod, DEFAULT_CONFIDENCE,
};

// Re-export the types callers need alongside the analytics
pub use riskband_config::{ColorToken, Palette, PaletteTable, ThresholdRegistry, ThresholdTable};
pub use riskband_core::{MetricKind, MetricSample, SeverityBand, Sign};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate, aggregate_with, AggregateOptions, AggregateResult};
    pub use crate::attribution::{allocation_risk_level, AllocationRiskLevel};
    pub use crate::classify::{classify, SeverityMapper};
    pub use crate::config::AnalyticsConfig;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::metrics::{summarize_returns, Frequency, ReturnSummary};
    pub use crate::resolve::{describe, format_signed, resolve, Presentation, Resolution};

    pub use riskband_config::{ColorToken, Palette, ThresholdRegistry};
    pub use riskband_core::{MetricKind, MetricSample, SeverityBand, Sign};
}
