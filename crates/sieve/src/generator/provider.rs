//! Insight generator trait and request type.

use crate::error::Result;
use crate::insight::CandidateInsight;
use crate::stats::StatisticsSnapshot;

/// Everything a generator is shown for one run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Ground-truth statistics for the decision metric.
    pub stats: &'a StatisticsSnapshot,
    /// Authoritative dataset column names.
    pub columns: &'a [String],
    /// Maximum number of insights to ask for.
    pub max_insights: usize,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(stats: &'a StatisticsSnapshot, columns: &'a [String]) -> Self {
        Self {
            stats,
            columns,
            max_insights: 5,
        }
    }

    pub fn with_max_insights(mut self, max_insights: usize) -> Self {
        self.max_insights = max_insights;
        self
    }

    /// The metric the insights should explain.
    pub fn decision_metric(&self) -> &'a str {
        &self.stats.decision_metric
    }
}

/// Source of candidate insights.
///
/// Output is untrusted: implementations may name columns that do not exist,
/// overstate confidence, or return nothing at all. Implementations must be
/// thread-safe (Send + Sync) so one generator can serve many requests.
pub trait InsightGenerator: Send + Sync {
    /// Propose candidate insights for a request.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<CandidateInsight>>;

    /// Get the generator name for logging.
    fn name(&self) -> &str;
}
