//! Integration tests for riskband-analytics.
//!
//! These tests run the classifier end to end over the dashboard datasets:
//! asset risk contributions, factor exposures, the correlation matrix and
//! the historical stress paths.

use approx::assert_relative_eq;
use riskband_analytics::prelude::*;
use riskband_analytics::{
    attribute, benchmark_deviation, leading_concentration, top_n_concentration, worst_scenario,
    CorrelationMatrix, DiversificationRatio, StressPath,
};
use riskband_analytics::{
    covariance_matrix, estimate_var, rolling_volatility, shock_impact, volatility_regimes,
    RegimeThresholds, ShockPosition, VarMethod, VolatilityRegime,
};
use riskband_config::ClassifierConfig;
use std::collections::BTreeMap;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Asset risk contributions (percent points) weighted by allocation.
fn asset_contributions() -> Vec<MetricSample> {
    [
        ("AAPL", 18.2, 22.5),
        ("MSFT", 15.8, 19.3),
        ("GOOGL", 14.1, 17.0),
        ("NVDA", 22.3, 15.2),
        ("TLT", 8.9, 13.0),
        ("GLD", 5.2, 13.0),
    ]
    .into_iter()
    .map(|(label, contribution, allocation)| {
        MetricSample::new(label, contribution, MetricKind::RiskContribution)
            .unwrap()
            .with_weight(allocation)
            .unwrap()
    })
    .collect()
}

/// Factor exposures with their benchmark exposures.
fn factor_exposures() -> Vec<(MetricSample, f64)> {
    [
        ("Market Beta", 0.91, 1.0),
        ("Size Factor", 0.24, 0.0),
        ("Value Factor", -0.12, 0.0),
        ("Quality Factor", 0.18, 0.0),
        ("Momentum", 0.15, 0.0),
        ("Volatility", -0.08, 0.0),
    ]
    .into_iter()
    .map(|(label, exposure, benchmark)| {
        (
            MetricSample::new(label, exposure, MetricKind::Exposure).unwrap(),
            benchmark,
        )
    })
    .collect()
}

fn dashboard_correlations() -> CorrelationMatrix {
    let labels = ["AAPL", "MSFT", "GOOGL", "NVDA", "SPY", "GLD", "TLT"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    CorrelationMatrix::new(
        labels,
        vec![
            vec![1.0, 0.85, 0.72, 0.68, 0.45, -0.12, -0.25],
            vec![0.85, 1.0, 0.78, 0.74, 0.52, -0.08, -0.22],
            vec![0.72, 0.78, 1.0, 0.81, 0.48, -0.15, -0.28],
            vec![0.68, 0.74, 0.81, 1.0, 0.39, -0.18, -0.31],
            vec![0.45, 0.52, 0.48, 0.39, 1.0, 0.25, 0.18],
            vec![-0.12, -0.08, -0.15, -0.18, 0.25, 1.0, 0.45],
            vec![-0.25, -0.22, -0.28, -0.31, 0.18, 0.45, 1.0],
        ],
    )
    .unwrap()
}

fn stress_paths() -> Vec<StressPath> {
    vec![
        StressPath::new(
            "2008 Financial Crisis",
            vec![100.0, 85.0, 72.0, 68.0, 74.0, 82.0],
        ),
        StressPath::new("2020 COVID Crash", vec![100.0, 93.0, 70.0, 80.0, 88.0, 96.0]),
        StressPath::new("Dotcom Bubble", vec![100.0, 95.0, 87.0, 78.0, 65.0, 60.0]),
        StressPath::new("Inflation Shock", vec![100.0, 90.0, 85.0, 83.0, 79.0, 76.0]),
    ]
}

// =============================================================================
// AGGREGATION
// =============================================================================

#[test]
fn test_asset_contribution_summary() {
    let samples = asset_contributions();
    let result = aggregate(&samples).unwrap();

    assert_relative_eq!(result.total, 84.5, epsilon = 1e-9);
    assert_eq!(result.dominant.label, "NVDA");
    assert_relative_eq!(result.weighted_average, 14.764, epsilon = 1e-9);

    // Magnitude ranking: NVDA, AAPL, MSFT
    assert_relative_eq!(result.top_n_concentration, 56.3, epsilon = 1e-9);
    // Input order: AAPL, MSFT, GOOGL
    assert_relative_eq!(leading_concentration(&samples, 3).unwrap(), 48.1, epsilon = 1e-9);

    let ratio = result.diversification_ratio.as_finite().unwrap();
    assert_relative_eq!(ratio, 6.0 / (1383.23_f64 / 100.0).sqrt(), epsilon = 1e-9);
}

#[test]
fn test_zero_weight_scenario() {
    let samples = vec![MetricSample::new("X", 0.0, MetricKind::Generic)
        .unwrap()
        .with_weight(0.0)
        .unwrap()];
    assert!(matches!(
        aggregate(&samples),
        Err(AnalyticsError::DivisionByZero { .. })
    ));
}

#[test]
fn test_empty_scenario() {
    assert!(matches!(
        aggregate(&[]),
        Err(AnalyticsError::EmptyInput { .. })
    ));
}

#[test]
fn test_custom_top_n() {
    let samples = asset_contributions();
    let result = aggregate_with(&samples, &AggregateOptions::default().with_top_n(1)).unwrap();
    assert_eq!(result.top_n, 1);
    assert_relative_eq!(result.top_n_concentration, 22.3, epsilon = 1e-9);
    assert_relative_eq!(
        result.concentration(3),
        top_n_concentration(&samples, 3).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_zero_exposures_are_unbounded() {
    let samples: Vec<_> = ["A", "B"]
        .iter()
        .map(|l| MetricSample::new(*l, 0.0, MetricKind::Exposure).unwrap())
        .collect();
    let result = aggregate(&samples).unwrap();
    assert_eq!(result.diversification_ratio, DiversificationRatio::Unbounded);
}

// =============================================================================
// CLASSIFICATION AND RESOLUTION
// =============================================================================

#[test]
fn test_asset_contribution_bands() {
    let mapper = SeverityMapper::standard();
    let bands: Vec<_> = asset_contributions()
        .iter()
        .map(|s| mapper.classify(s.value, s.kind).unwrap())
        .collect();
    assert_eq!(
        bands,
        vec![
            SeverityBand::Moderate, // AAPL 18.2
            SeverityBand::Moderate, // MSFT 15.8
            SeverityBand::Low,      // GOOGL 14.1
            SeverityBand::High,     // NVDA 22.3
            SeverityBand::Minimal,  // TLT 8.9
            SeverityBand::Minimal,  // GLD 5.2
        ]
    );
}

#[test]
fn test_factor_significance() {
    let presentations: Vec<_> = factor_exposures()
        .iter()
        .map(|(s, _)| describe(s.value, s.kind, &Palette::Significance).unwrap())
        .collect();

    // Market Beta
    assert_eq!(presentations[0].band, SeverityBand::High);
    assert_eq!(presentations[0].resolution.color, ColorToken::Yellow);
    assert_eq!(presentations[0].formatted, "+0.91");

    // Value Factor
    assert_eq!(presentations[2].band, SeverityBand::Minimal);
    assert_eq!(presentations[2].resolution.color, ColorToken::Gray);
    assert_eq!(presentations[2].resolution.sign, Sign::Negative);
    assert_eq!(presentations[2].formatted, "-0.12");

    // Only Market Beta stands out
    let significant = presentations
        .iter()
        .filter(|p| p.band > SeverityBand::Minimal)
        .count();
    assert_eq!(significant, 1);
}

#[test]
fn test_factor_benchmark_deviation() {
    let near: Vec<_> = factor_exposures()
        .iter()
        .map(|(s, benchmark)| benchmark_deviation(s.value, *benchmark).near_benchmark)
        .collect();
    assert_eq!(near, vec![true, false, false, false, false, true]);
}

#[test]
fn test_negative_correlation_scenario() {
    let band = classify(-0.25, MetricKind::Correlation).unwrap();
    assert_eq!(band, SeverityBand::Low);
    let r = resolve(band, Sign::of(-0.25), &Palette::Correlation);
    assert_eq!(r.color, ColorToken::Green);
    assert_eq!(r.label, "Low");
    assert_eq!(r.sign, Sign::Negative);
}

#[test]
fn test_classify_all_matches_single() {
    let mapper = SeverityMapper::standard();
    let samples: Vec<_> = asset_contributions()
        .into_iter()
        .chain(factor_exposures().into_iter().map(|(s, _)| s))
        .collect();
    let config = AnalyticsConfig::new().with_threshold(2);
    let classified = mapper.classify_all(&samples, &config).unwrap();
    for (sample, c) in samples.iter().zip(&classified) {
        assert_eq!(c.label, sample.label);
        assert_eq!(c.band, mapper.classify(sample.value, sample.kind).unwrap());
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_configured_registry() {
    let config = ClassifierConfig::from_toml_str(
        r#"
        [thresholds.sharpe]
        mode = "exclusive"
        bands = [{ bound = 1.0, band = "low" }, { bound = 2.0, band = "high" }]

        [palettes.heatmap]
        minimal = "gray"
        low = "green"
        moderate = "amber"
        high = "red"
        "#,
    )
    .unwrap();

    let mapper = SeverityMapper::new(config.build_registry().unwrap());
    assert_eq!(
        mapper.classify(2.5, MetricKind::Sharpe).unwrap(),
        SeverityBand::High
    );
    assert_eq!(
        mapper.classify(1.5, MetricKind::Sharpe).unwrap(),
        SeverityBand::Low
    );
    // Standard tables are still present
    assert_eq!(
        mapper.classify(0.91, MetricKind::Exposure).unwrap(),
        SeverityBand::High
    );

    let palette = config.palette("heatmap").unwrap();
    let p = mapper
        .describe(2.5, MetricKind::Sharpe, &palette)
        .unwrap();
    assert_eq!(p.resolution.color, ColorToken::Red);
}

// =============================================================================
// DASHBOARD ANALYTICS
// =============================================================================

#[test]
fn test_correlation_matrix_summary() {
    let matrix = dashboard_correlations();
    let summary = matrix.summarize(&SeverityMapper::standard()).unwrap();

    assert_eq!(summary.pair_count, 21);
    assert_eq!(summary.strongest.left, "AAPL");
    assert_eq!(summary.strongest.right, "MSFT");
    assert_eq!(summary.strongest.describe(), "Positive Correlation: 0.850");

    let abs_sum: f64 = matrix.pairs().iter().map(|p| p.value.abs()).sum();
    assert_relative_eq!(summary.average_abs, abs_sum / 21.0, epsilon = 1e-12);

    // 0.85 and 0.81
    assert_eq!(summary.band_counts[&SeverityBand::High], 2);
    let counted: usize = summary.band_counts.values().sum();
    assert_eq!(counted, 21);
}

#[test]
fn test_allocation_levels() {
    let rows = attribute(&asset_contributions()).unwrap();
    let levels: Vec<_> = rows.iter().map(|r| (r.label.as_str(), r.level)).collect();
    assert_eq!(
        levels,
        vec![
            ("AAPL", AllocationRiskLevel::Normal),
            ("MSFT", AllocationRiskLevel::Normal),
            ("GOOGL", AllocationRiskLevel::Normal),
            ("NVDA", AllocationRiskLevel::High),
            ("TLT", AllocationRiskLevel::Low),
            ("GLD", AllocationRiskLevel::Low),
        ]
    );
    assert_eq!(format_signed(rows[3].excess_risk, 1, "%"), "+7.1%");
    assert_eq!(format_signed(rows[0].excess_risk, 1, "%"), "-4.3%");
}

#[test]
fn test_stress_scenarios() {
    let paths = stress_paths();
    let crisis = paths[0].summarize().unwrap();
    assert_relative_eq!(crisis.max_drawdown_pct, 32.0, epsilon = 1e-9);
    assert_eq!(crisis.trough_index, 3);
    assert_relative_eq!(crisis.recovery_pct, 43.75, epsilon = 1e-9);

    let worst = worst_scenario(&paths).unwrap();
    assert_eq!(worst.name, "Dotcom Bubble");
    assert_relative_eq!(worst.max_drawdown_pct, 40.0, epsilon = 1e-9);
    assert_eq!(worst.recovery_pct, 0.0);
}

// =============================================================================
// RETURN-SERIES ANALYTICS
// =============================================================================

/// Twelve monthly returns for an equity, a tech and a bond holding.
fn monthly_returns() -> (Vec<String>, Vec<Vec<f64>>) {
    let labels = vec!["SPY".to_string(), "QQQ".to_string(), "TLT".to_string()];
    let series = vec![
        vec![0.021, -0.013, 0.034, -0.042, 0.018, 0.009, -0.027, 0.031, 0.012, -0.008, 0.025, 0.004],
        vec![0.030, -0.021, 0.046, -0.061, 0.025, 0.014, -0.038, 0.044, 0.019, -0.012, 0.036, 0.006],
        vec![-0.006, 0.011, -0.009, 0.017, -0.004, 0.002, 0.012, -0.010, -0.003, 0.005, -0.007, 0.001],
    ];
    (labels, series)
}

#[test]
fn test_returns_to_classified_risk_contributions() {
    let (labels, series) = monthly_returns();
    let cov = covariance_matrix(labels, &series)
        .unwrap()
        .annualized(Frequency::Monthly);

    let contributions = cov.risk_contributions(&[0.5, 0.3, 0.2]).unwrap();
    let total_pct: f64 = contributions.iter().map(|c| c.percent).sum();
    assert_relative_eq!(total_pct, 100.0, epsilon = 1e-9);

    let samples: Vec<MetricSample> = contributions
        .iter()
        .map(|c| c.to_sample().unwrap())
        .collect();
    let result = aggregate(&samples).unwrap();
    assert_relative_eq!(result.total, 100.0, epsilon = 1e-9);
    assert_relative_eq!(result.total_weight, 100.0, epsilon = 1e-9);

    // The bond hedges the equity book, so its share is below zero
    let tlt = contributions.iter().find(|c| c.label == "TLT").unwrap();
    assert!(tlt.percent < 0.0);
    assert_eq!(Sign::of(tlt.percent), Sign::Negative);
    assert_ne!(result.dominant.label, "TLT");
    assert_eq!(
        classify(result.dominant.value, MetricKind::RiskContribution).unwrap(),
        SeverityBand::High
    );
}

#[test]
fn test_return_summary_and_tail_risk() {
    let (_, series) = monthly_returns();
    let spy = &series[0];

    let summary = summarize_returns(spy, 0.02, Frequency::Monthly).unwrap();
    assert_eq!(summary.observations, 12);
    assert!(summary.volatility > 0.0);
    assert!(summary.max_drawdown < 0.0);

    let mapper = SeverityMapper::standard();
    for sample in summary.to_samples("SPY").unwrap() {
        assert!(mapper.classify_sample(&sample).is_ok());
    }

    let historical = estimate_var(spy, 0.90, VarMethod::Historical).unwrap();
    let parametric = estimate_var(spy, 0.90, VarMethod::Parametric).unwrap();
    assert!(historical.var > 0.0 && historical.cvar >= historical.var);
    assert!(parametric.var > 0.0 && parametric.cvar >= parametric.var);
}

#[test]
fn test_regimes_from_rolling_volatility() {
    let (_, series) = monthly_returns();
    let rolling = rolling_volatility(&series[1], 4, Frequency::Monthly).unwrap();
    assert_eq!(rolling.len(), 9);

    let thresholds = RegimeThresholds::new(0.05, 0.12).unwrap();
    let regimes = volatility_regimes(&rolling, &thresholds).unwrap();
    assert_eq!(regimes.len(), rolling.len());
    for (vol, regime) in rolling.iter().zip(&regimes) {
        let expected = if *vol > 0.12 {
            VolatilityRegime::Volatile
        } else if *vol < 0.05 {
            VolatilityRegime::Calm
        } else {
            VolatilityRegime::Neutral
        };
        assert_eq!(*regime, expected);
    }
}

#[test]
fn test_price_shock_scenario() {
    let positions = vec![
        ShockPosition::new("AAPL", 190.0, 100.0),
        ShockPosition::new("NVDA", 120.0, 150.0),
        ShockPosition::new("TLT", 92.0, 200.0),
    ];
    let shocks = BTreeMap::from([
        ("AAPL".to_string(), -0.20),
        ("NVDA".to_string(), -0.30),
        ("TLT".to_string(), 0.05),
    ]);
    let impact = shock_impact(&positions, &shocks).unwrap();
    let expected = (-3_800.0 - 5_400.0 + 920.0) / (19_000.0 + 18_000.0 + 18_400.0);
    assert_relative_eq!(impact.relative_change, expected, epsilon = 1e-12);
    assert!(impact.unmatched.is_empty());
}

// =============================================================================
// THREAD SAFETY
// =============================================================================

#[test]
fn test_public_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<MetricSample>();
    assert_send_sync::<SeverityBand>();
    assert_send_sync::<ThresholdRegistry>();
    assert_send_sync::<Palette>();
    assert_send_sync::<SeverityMapper>();
    assert_send_sync::<AnalyticsConfig>();
    assert_send_sync::<AggregateResult>();
    assert_send_sync::<Resolution>();
    assert_send_sync::<Presentation>();
    assert_send_sync::<CorrelationMatrix>();
    assert_send_sync::<StressPath>();
    assert_send_sync::<AnalyticsError>();
    assert_send_sync::<ClassifierConfig>();
    assert_send_sync::<riskband_analytics::CovarianceMatrix>();
    assert_send_sync::<riskband_analytics::ReturnSummary>();
    assert_send_sync::<riskband_analytics::VarEstimate>();
    assert_send_sync::<riskband_config::ConfigError>();
    assert_send_sync::<riskband_core::CoreError>();

    // The shared mapper is usable from several threads at once
    let mapper = SeverityMapper::shared();
    std::thread::scope(|scope| {
        for value in [0.1, 0.6, 0.9] {
            scope.spawn(move || mapper.classify(value, MetricKind::Correlation).unwrap());
        }
    });
}
