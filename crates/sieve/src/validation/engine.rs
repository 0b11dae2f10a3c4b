//! The validation and ranking engine.
//!
//! Every call runs four stages over the candidate list:
//!
//! 1. **Feature validation**: the factor must be exactly one known column,
//!    never a composite of several and never the decision metric.
//! 2. **Impact resolution**: the factor must have an entry in the statistics.
//! 3. **Confidence correction**: confidence is recomputed from the resolved
//!    magnitude; anything under the weak-signal floor is dropped.
//! 4. **Ranking**: survivors are sorted by impact score, descending, ties by
//!    factor name, and ranked 1..N.
//!
//! The engine holds no state between calls and never fails; invalid input
//! simply produces fewer insights.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::insight::{CandidateInsight, Confidence, ValidatedInsight};
use crate::stats::StatisticsSnapshot;

use super::catalog::{FactorCatalog, FactorImpact};
use super::rejection::{Rejection, RejectionReason, ValidationReport};
use super::thresholds::Thresholds;

/// Validates and ranks candidate insights against ground-truth statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightValidator {
    thresholds: Thresholds,
}

/// A candidate that passed stages 1-3.
struct Accepted<'c> {
    index: usize,
    factor: &'c str,
    why_it_matters: &'c str,
    evidence: &'c str,
    impact: FactorImpact,
    confidence: Confidence,
}

impl Accepted<'_> {
    /// Preference between two candidates for the same factor.
    ///
    /// The longer rationale wins; ties fall back to text order so the choice
    /// never depends on input position.
    fn preferred_over(&self, other: &Self) -> bool {
        let by_detail = self
            .why_it_matters
            .len()
            .cmp(&other.why_it_matters.len())
            .then_with(|| other.why_it_matters.cmp(self.why_it_matters))
            .then_with(|| other.evidence.cmp(self.evidence));
        by_detail == Ordering::Greater
    }

    fn ranking_order(&self, other: &Self) -> Ordering {
        other
            .impact
            .impact_score
            .total_cmp(&self.impact.impact_score)
            .then_with(|| self.factor.cmp(other.factor))
    }
}

impl InsightValidator {
    /// Create a validator with the standard thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom threshold set.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Validate candidates and return the ranked survivors.
    pub fn validate<S: AsRef<str>>(
        &self,
        raw: &[CandidateInsight],
        stats: &StatisticsSnapshot,
        columns: &[S],
    ) -> Vec<ValidatedInsight> {
        self.validate_with_report(raw, stats, columns).insights
    }

    /// Validate candidates and also explain every rejection.
    pub fn validate_with_report<S: AsRef<str>>(
        &self,
        raw: &[CandidateInsight],
        stats: &StatisticsSnapshot,
        columns: &[S],
    ) -> ValidationReport {
        if raw.is_empty() {
            return ValidationReport::default();
        }

        let catalog = FactorCatalog::build(stats, columns);
        let mut rejections = Vec::new();
        let mut by_factor: BTreeMap<&str, Accepted<'_>> = BTreeMap::new();

        for (index, candidate) in raw.iter().enumerate() {
            let accepted = match self.screen(index, candidate, &catalog) {
                Ok(accepted) => accepted,
                Err(reason) => {
                    rejections.push(reject(index, candidate.factor.as_deref(), reason));
                    continue;
                }
            };

            match by_factor.remove(accepted.factor) {
                Some(kept) if !accepted.preferred_over(&kept) => {
                    rejections.push(reject(
                        accepted.index,
                        Some(accepted.factor),
                        RejectionReason::DuplicateFactor,
                    ));
                    by_factor.insert(kept.factor, kept);
                }
                previous => {
                    if let Some(dropped) = previous {
                        rejections.push(reject(
                            dropped.index,
                            Some(dropped.factor),
                            RejectionReason::DuplicateFactor,
                        ));
                    }
                    by_factor.insert(accepted.factor, accepted);
                }
            }
        }

        let mut survivors: Vec<Accepted<'_>> = by_factor.into_values().collect();
        survivors.sort_by(Accepted::ranking_order);
        rejections.sort_by_key(|r| r.input_index);

        let insights: Vec<ValidatedInsight> = survivors
            .into_iter()
            .enumerate()
            .map(|(i, a)| {
                ValidatedInsight::new(
                    i + 1,
                    a.factor.to_string(),
                    a.why_it_matters.to_string(),
                    a.evidence.to_string(),
                    a.confidence,
                )
            })
            .collect();

        info!(
            decision_metric = %stats.decision_metric,
            candidates = raw.len(),
            accepted = insights.len(),
            rejected = rejections.len(),
            "validated insights"
        );

        ValidationReport {
            insights,
            rejections,
        }
    }

    /// Run feature validation, impact resolution and confidence correction.
    fn screen<'c>(
        &self,
        index: usize,
        candidate: &'c CandidateInsight,
        catalog: &FactorCatalog<'_>,
    ) -> Result<Accepted<'c>, RejectionReason> {
        let factor = required(candidate.factor.as_deref(), "factor")?;
        let why_it_matters = required(candidate.why_it_matters.as_deref(), "why_it_matters")?;

        catalog
            .check_name(factor)
            .map_err(RejectionReason::hallucination)?;

        let impact = *catalog
            .resolve(factor)
            .ok_or(RejectionReason::UnresolvedFactor)?;

        let confidence = self
            .thresholds
            .classify(impact.factor_type, impact.magnitude)
            .ok_or(RejectionReason::WeakSignal {
                magnitude: impact.magnitude,
            })?;

        Ok(Accepted {
            index,
            factor,
            why_it_matters,
            evidence: candidate.evidence.as_deref().unwrap_or(""),
            impact,
            confidence,
        })
    }
}

fn required<'c>(value: Option<&'c str>, field: &str) -> Result<&'c str, RejectionReason> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| RejectionReason::MalformedCandidate {
            missing: field.to_string(),
        })
}

fn reject(input_index: usize, factor: Option<&str>, reason: RejectionReason) -> Rejection {
    debug!(input_index, factor = ?factor, %reason, "rejected candidate");
    Rejection {
        input_index,
        factor: factor.map(str::to_string),
        reason,
    }
}

/// Validate candidates with the standard thresholds.
pub fn validate<S: AsRef<str>>(
    raw: &[CandidateInsight],
    stats: &StatisticsSnapshot,
    columns: &[S],
) -> Vec<ValidatedInsight> {
    InsightValidator::new().validate(raw, stats, columns)
}
