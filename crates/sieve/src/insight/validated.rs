//! Insights that passed validation.

use serde::{Deserialize, Serialize};

/// Confidence label recomputed from ground-truth impact magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// An insight whose factor is a single real column with a resolvable impact.
///
/// Only the validator constructs these; `rank` and `confidence` are computed
/// by the engine and never copied from the generator. There is no public
/// deserializer: stored insights come back only inside an
/// [`InsightSnapshot`](crate::InsightSnapshot) loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedInsight {
    rank: usize,
    factor: String,
    why_it_matters: String,
    evidence: String,
    confidence: Confidence,
}

impl ValidatedInsight {
    pub(crate) fn new(
        rank: usize,
        factor: String,
        why_it_matters: String,
        evidence: String,
        confidence: Confidence,
    ) -> Self {
        Self {
            rank,
            factor,
            why_it_matters,
            evidence,
            confidence,
        }
    }

    /// 1-based position in the validated ranking.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Exact dataset column name.
    pub fn factor(&self) -> &str {
        &self.factor
    }

    pub fn why_it_matters(&self) -> &str {
        &self.why_it_matters
    }

    pub fn evidence(&self) -> &str {
        &self.evidence
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(Confidence::Medium.to_string(), "medium");
        assert!(Confidence::Low < Confidence::High);
    }

    #[test]
    fn test_validated_insight_shape() {
        let insight = ValidatedInsight::new(
            1,
            "region".to_string(),
            "West outsells South".to_string(),
            String::new(),
            Confidence::High,
        );

        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["rank"], 1);
        assert_eq!(value["factor"], "region");
        assert_eq!(value["evidence"], "");
        assert_eq!(value["confidence"], "high");
    }
}
