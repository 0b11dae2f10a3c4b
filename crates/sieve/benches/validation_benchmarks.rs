//! Validation performance benchmarks.
//!
//! Measures validation cost as the candidate list and statistics tables grow,
//! plus generator-output parsing.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sieve::stats::{CorrelationEntry, SegmentImpact, TopFactor};
use sieve::{CandidateInsight, FactorType, InsightValidator, StatisticsSnapshot, parse_candidates};

/// Build statistics with `n` numeric and `n` categorical factors.
fn synthetic_stats(n: usize) -> (StatisticsSnapshot, Vec<String>) {
    let mut stats = StatisticsSnapshot::new("revenue");
    let mut columns = vec!["revenue".to_string()];

    for i in 0..n {
        let numeric = format!("num_{}", i);
        let categorical = format!("cat_{}", i);
        let r = (i % 97) as f64 / 100.0;

        stats.all_correlations.push(CorrelationEntry {
            factor: numeric.clone(),
            correlation: Some(r),
            abs_correlation: Some(r),
            factor_type: FactorType::Numeric,
        });
        stats.all_segment_impacts.push(SegmentImpact {
            factor: categorical.clone(),
            mean_difference: Some(r * 4500.0),
            relative_impact_pct: Some(r * 100.0),
            factor_type: FactorType::Categorical,
            top_segments: None,
            bottom_segments: None,
        });
        if i < 5 {
            stats.top_factors.push(TopFactor {
                factor: numeric.clone(),
                impact_score: Some(r * 100.0),
                factor_type: FactorType::Numeric,
                correlation: Some(r),
                abs_correlation: Some(r),
                mean_difference: None,
                relative_impact_pct: None,
                top_segments: None,
                bottom_segments: None,
            });
        }
        columns.push(numeric);
        columns.push(categorical);
    }

    (stats, columns)
}

/// Candidates mixing valid factors, composites and invented names.
fn synthetic_candidates(n: usize) -> Vec<CandidateInsight> {
    (0..n)
        .map(|i| {
            let factor = match i % 4 {
                0 => format!("num_{}", i),
                1 => format!("cat_{}", i),
                2 => format!("num_{} cat_{}", i, i),
                _ => format!("invented_{}", i),
            };
            CandidateInsight::new(factor, "Generated rationale").with_rank(i + 1)
        })
        .collect()
}

/// Benchmark validation against growing statistics tables.
fn bench_validation_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_scaling");
    let validator = InsightValidator::new();

    for size in [10, 50, 200, 2000].iter() {
        let (stats, columns) = synthetic_stats(*size);
        let raw = synthetic_candidates(*size);

        group.bench_with_input(BenchmarkId::new("validate", size), &raw, |b, raw| {
            b.iter(|| black_box(validator.validate(raw, &stats, &columns)))
        });
    }

    group.finish();
}

/// Benchmark the typical generator batch of a handful of insights.
fn bench_typical_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("typical_batch");
    let validator = InsightValidator::new();
    let (stats, columns) = synthetic_stats(30);
    let raw = synthetic_candidates(8);

    group.bench_function("validate_8", |b| {
        b.iter(|| black_box(validator.validate(&raw, &stats, &columns)))
    });

    group.bench_function("validate_with_report_8", |b| {
        b.iter(|| black_box(validator.validate_with_report(&raw, &stats, &columns)))
    });

    group.finish();
}

/// Benchmark parsing generator output.
fn bench_parse_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_candidates");
    let body = serde_json::to_string(&synthetic_candidates(8)).unwrap_or_default();
    let fenced = format!("Here are the insights:\n```json\n{}\n```\n", body);
    let prose = format!("Sure! {} Let me know if you need more.", body);

    group.bench_function("bare", |b| b.iter(|| black_box(parse_candidates(&body))));
    group.bench_function("fenced", |b| b.iter(|| black_box(parse_candidates(&fenced))));
    group.bench_function("prose", |b| b.iter(|| black_box(parse_candidates(&prose))));

    group.finish();
}

criterion_group!(
    benches,
    bench_validation_scaling,
    bench_typical_batch,
    bench_parse_candidates,
);

criterion_main!(benches);
