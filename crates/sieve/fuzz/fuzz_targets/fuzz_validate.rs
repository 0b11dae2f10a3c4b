//! Fuzz target for the insight validator.
//!
//! Builds candidates and columns from arbitrary strings and checks that
//! validation never panics and always yields contiguous ranks.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sieve::stats::CorrelationEntry;
use sieve::{CandidateInsight, FactorType, StatisticsSnapshot, validate};

#[derive(Debug, Arbitrary)]
struct Input {
    decision_metric: String,
    columns: Vec<String>,
    correlations: Vec<(String, f64)>,
    candidates: Vec<(Option<String>, Option<String>, Option<String>)>,
}

fuzz_target!(|input: Input| {
    let mut stats = StatisticsSnapshot::new(input.decision_metric);
    stats.all_correlations = input
        .correlations
        .into_iter()
        .map(|(factor, r)| CorrelationEntry {
            factor,
            correlation: Some(r),
            abs_correlation: None,
            factor_type: FactorType::Numeric,
        })
        .collect();

    let raw: Vec<CandidateInsight> = input
        .candidates
        .into_iter()
        .map(|(factor, why_it_matters, evidence)| CandidateInsight {
            factor,
            why_it_matters,
            evidence,
            ..Default::default()
        })
        .collect();

    let out = validate(&raw, &stats, &input.columns);
    for (i, insight) in out.iter().enumerate() {
        assert_eq!(insight.rank(), i + 1);
    }
});
