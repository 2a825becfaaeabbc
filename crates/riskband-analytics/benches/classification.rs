//! Benchmarks for severity classification, aggregation and return-series metrics.
//!
//! Run with: cargo bench -p riskband-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use riskband_analytics::prelude::*;
use riskband_analytics::{covariance_matrix, estimate_var, CorrelationMatrix, VarMethod};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_samples(n: usize) -> Vec<MetricSample> {
    let kinds = [
        MetricKind::Correlation,
        MetricKind::Exposure,
        MetricKind::RiskContribution,
        MetricKind::Beta,
        MetricKind::Sharpe,
    ];
    (0..n)
        .map(|i| {
            let value = ((i * 37) % 250) as f64 / 10.0 - 12.5;
            MetricSample::new(format!("S{i:05}"), value, kinds[i % kinds.len()])
                .unwrap()
                .with_weight(1.0 + (i % 20) as f64)
                .unwrap()
        })
        .collect()
}

fn create_matrix(n: usize) -> CorrelationMatrix {
    let labels = (0..n).map(|i| format!("A{i}")).collect();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        ((i + j) % 19) as f64 / 10.0 - 0.9
                    }
                })
                .collect()
        })
        .collect();
    CorrelationMatrix::new(labels, rows).unwrap()
}

fn create_returns(n: usize, seed: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (((i * 31 + seed * 17) % 97) as f64 - 48.0) / 2_000.0)
        .collect()
}

// =============================================================================
// CLASSIFICATION BENCHMARKS
// =============================================================================

fn bench_classify_single(c: &mut Criterion) {
    let mapper = SeverityMapper::standard();

    c.bench_function("classify_correlation", |b| {
        b.iter(|| mapper.classify(black_box(0.79999), MetricKind::Correlation))
    });

    c.bench_function("describe_exposure", |b| {
        b.iter(|| mapper.describe(black_box(0.91), MetricKind::Exposure, &Palette::Significance))
    });
}

fn bench_classify_batch(c: &mut Criterion) {
    let mapper = SeverityMapper::standard();
    let mut group = c.benchmark_group("classify_all");

    for size in [100, 1_000, 10_000] {
        let samples = create_samples(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &samples, |b, s| {
            let config = AnalyticsConfig::sequential();
            b.iter(|| mapper.classify_all(black_box(s), &config))
        });

        group.bench_with_input(BenchmarkId::new("configured", size), &samples, |b, s| {
            let config = AnalyticsConfig::default();
            b.iter(|| mapper.classify_all(black_box(s), &config))
        });
    }

    group.finish();
}

// =============================================================================
// AGGREGATION BENCHMARKS
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [6, 100, 10_000] {
        let samples = create_samples(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, s| {
            b.iter(|| aggregate(black_box(s)))
        });
    }

    group.finish();
}

fn bench_correlation_summary(c: &mut Criterion) {
    let mapper = SeverityMapper::standard();
    let matrix = create_matrix(50);

    c.bench_function("correlation_summary_50", |b| {
        b.iter(|| black_box(&matrix).summarize(&mapper))
    });
}

// =============================================================================
// RETURN-SERIES BENCHMARKS
// =============================================================================

fn bench_return_series(c: &mut Criterion) {
    let returns = create_returns(2_520, 0);

    c.bench_function("summarize_returns_10y_daily", |b| {
        b.iter(|| summarize_returns(black_box(&returns), 0.02, Frequency::Daily))
    });

    let mut group = c.benchmark_group("var");
    for method in [VarMethod::Historical, VarMethod::Parametric] {
        group.bench_with_input(
            BenchmarkId::new("estimate", format!("{method:?}")),
            &returns,
            |b, r| b.iter(|| estimate_var(black_box(r), 0.99, method)),
        );
    }
    group.finish();

    let labels: Vec<String> = (0..20).map(|i| format!("A{i}")).collect();
    let series: Vec<Vec<f64>> = (0..20).map(|i| create_returns(252, i)).collect();
    c.bench_function("risk_contributions_20", |b| {
        b.iter(|| {
            covariance_matrix(labels.clone(), black_box(&series))
                .and_then(|cov| cov.risk_contributions(&[0.05; 20]))
        })
    });
}

criterion_group!(classification, bench_classify_single, bench_classify_batch);
criterion_group!(aggregation, bench_aggregate, bench_correlation_summary);
criterion_group!(return_series, bench_return_series);
criterion_main!(classification, aggregation, return_series);
