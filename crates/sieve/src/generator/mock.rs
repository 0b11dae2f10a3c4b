//! Mock insight generator for testing.

use crate::error::Result;
use crate::insight::CandidateInsight;

use super::provider::{GenerationRequest, InsightGenerator};

/// Behaviour switches for [`MockGenerator`].
#[derive(Debug, Clone)]
pub struct MockGeneratorConfig {
    /// Append hallucinated candidates after the real ones.
    pub include_hallucinations: bool,
    /// Claimed confidence on every candidate.
    pub claimed_confidence: String,
}

impl Default for MockGeneratorConfig {
    fn default() -> Self {
        Self {
            include_hallucinations: true,
            claimed_confidence: "high".to_string(),
        }
    }
}

/// Mock generator that returns predictable, partly wrong candidates.
///
/// Real candidates are listed in reverse impact order so that ranking has
/// work to do.
pub struct MockGenerator {
    config: MockGeneratorConfig,
}

impl MockGenerator {
    /// Create a new mock generator.
    pub fn new() -> Self {
        Self {
            config: MockGeneratorConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: MockGeneratorConfig) -> Self {
        Self { config }
    }

    fn candidate(&self, rank: usize, factor: &str, why: String, evidence: String) -> CandidateInsight {
        CandidateInsight::new(factor, why)
            .with_rank(rank)
            .with_evidence(evidence)
            .with_confidence(self.config.claimed_confidence.clone())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for MockGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<CandidateInsight>> {
        let metric = request.decision_metric();
        let mut candidates: Vec<CandidateInsight> = request
            .stats
            .top_factors
            .iter()
            .take(request.max_insights)
            .rev()
            .enumerate()
            .map(|(i, top)| {
                let score = top.impact_score.unwrap_or_default();
                self.candidate(
                    i + 1,
                    &top.factor,
                    format!("{} strongly influences {}", top.factor, metric),
                    format!("Impact score {:.1}", score),
                )
            })
            .collect();

        if self.config.include_hallucinations {
            let mut real = request
                .columns
                .iter()
                .filter(|c| c.as_str() != metric);
            if let (Some(a), Some(b)) = (real.next(), real.next()) {
                candidates.push(self.candidate(
                    candidates.len() + 1,
                    &format!("{} {}", a, b),
                    format!("{} and {} together drive {}", a, b, metric),
                    String::new(),
                ));
            }
            candidates.push(self.candidate(
                candidates.len() + 1,
                "customer_sentiment_index",
                format!("Sentiment is the hidden driver of {}", metric),
                String::new(),
            ));
            if !metric.is_empty() {
                candidates.push(self.candidate(
                    candidates.len() + 1,
                    metric,
                    format!("{} predicts itself", metric),
                    String::new(),
                ));
            }
        }

        Ok(candidates)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
