//! Why a candidate was dropped.

use serde::{Deserialize, Serialize};

use crate::insight::ValidatedInsight;

/// The ways a factor name can fail to name a single real column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HallucinationKind {
    /// Not a column or known factor.
    UnknownFactor,
    /// Joins several known names, e.g. `"marketing_spend region"`.
    CompositeFactor { parts: Vec<String> },
    /// Names the metric being explained.
    DecisionMetric,
}

impl HallucinationKind {
    pub fn label(&self) -> &'static str {
        match self {
            HallucinationKind::UnknownFactor => "unknown factor",
            HallucinationKind::CompositeFactor { .. } => "composite factor",
            HallucinationKind::DecisionMetric => "decision metric",
        }
    }
}

/// Reason attached to a dropped candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The factor is not a single real column.
    FeatureHallucination { hallucination: HallucinationKind },
    /// A real column with no entry in any statistics table.
    UnresolvedFactor,
    /// Resolved magnitude is below the weak-signal floor.
    WeakSignal { magnitude: f64 },
    /// A required text field is missing or blank.
    MalformedCandidate { missing: String },
    /// Another candidate for the same factor was kept.
    DuplicateFactor,
}

impl RejectionReason {
    pub fn hallucination(kind: HallucinationKind) -> Self {
        RejectionReason::FeatureHallucination {
            hallucination: kind,
        }
    }

    /// Get a short label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::FeatureHallucination { .. } => "Hallucinated feature",
            RejectionReason::UnresolvedFactor => "Unresolved factor",
            RejectionReason::WeakSignal { .. } => "Weak signal",
            RejectionReason::MalformedCandidate { .. } => "Malformed candidate",
            RejectionReason::DuplicateFactor => "Duplicate factor",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::FeatureHallucination { hallucination } => match hallucination {
                HallucinationKind::CompositeFactor { parts } => {
                    write!(f, "composite of {}", parts.join(", "))
                }
                other => write!(f, "{}", other.label()),
            },
            RejectionReason::UnresolvedFactor => write!(f, "no statistics for factor"),
            RejectionReason::WeakSignal { magnitude } => {
                write!(f, "weak signal (magnitude {:.3})", magnitude)
            }
            RejectionReason::MalformedCandidate { missing } => write!(f, "missing {}", missing),
            RejectionReason::DuplicateFactor => write!(f, "duplicate of a kept insight"),
        }
    }
}

/// A dropped candidate, identified by its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub input_index: usize,
    pub factor: Option<String>,
    #[serde(flatten)]
    pub reason: RejectionReason,
}

/// Accepted insights plus the reasons for everything dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub insights: Vec<ValidatedInsight>,
    pub rejections: Vec<Rejection>,
}

impl ValidationReport {
    /// Total candidates seen.
    pub fn candidate_count(&self) -> usize {
        self.insights.len() + self.rejections.len()
    }

    /// Rejections whose factor was hallucinated.
    pub fn hallucinations(&self) -> impl Iterator<Item = &Rejection> {
        self.rejections
            .iter()
            .filter(|r| matches!(r.reason, RejectionReason::FeatureHallucination { .. }))
    }

    /// Count rejections per label, in first-seen order.
    pub fn rejection_summary(&self) -> Vec<(&'static str, usize)> {
        let mut summary: Vec<(&'static str, usize)> = Vec::new();
        for rejection in &self.rejections {
            let label = rejection.reason.label();
            match summary.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => summary.push((label, 1)),
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_serializes_flat() {
        let rejection = Rejection {
            input_index: 2,
            factor: Some("a b".to_string()),
            reason: RejectionReason::hallucination(HallucinationKind::CompositeFactor {
                parts: vec!["a".to_string(), "b".to_string()],
            }),
        };

        let value = serde_json::to_value(&rejection).unwrap();
        assert_eq!(value["input_index"], 2);
        assert_eq!(value["reason"], "feature_hallucination");
        assert_eq!(value["hallucination"]["kind"], "composite_factor");
        assert_eq!(value["hallucination"]["parts"][1], "b");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RejectionReason::WeakSignal { magnitude: 0.04 }.to_string(),
            "weak signal (magnitude 0.040)"
        );
        assert_eq!(
            RejectionReason::hallucination(HallucinationKind::UnknownFactor).to_string(),
            "unknown factor"
        );
    }

    #[test]
    fn test_summary_counts() {
        let report = ValidationReport {
            insights: Vec::new(),
            rejections: vec![
                Rejection {
                    input_index: 0,
                    factor: None,
                    reason: RejectionReason::MalformedCandidate {
                        missing: "factor".to_string(),
                    },
                },
                Rejection {
                    input_index: 1,
                    factor: Some("x".to_string()),
                    reason: RejectionReason::UnresolvedFactor,
                },
                Rejection {
                    input_index: 2,
                    factor: None,
                    reason: RejectionReason::MalformedCandidate {
                        missing: "why_it_matters".to_string(),
                    },
                },
            ],
        };

        assert_eq!(report.candidate_count(), 3);
        assert_eq!(
            report.rejection_summary(),
            vec![("Malformed candidate", 2), ("Unresolved factor", 1)]
        );
        assert_eq!(report.hallucinations().count(), 0);
    }
}
