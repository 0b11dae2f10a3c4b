//! A stored, versioned set of validated insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::insight::{Confidence, ValidatedInsight};
use crate::stats::StatisticsSnapshot;

/// Validated insights saved together with the statistics they were checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSnapshot {
    /// Version number, starting at 1 per dataset and metric.
    pub version: u32,
    pub dataset_id: String,
    pub decision_metric: String,
    /// Fingerprint of the statistics and columns at save time.
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub statistics: StatisticsSnapshot,
    #[serde(deserialize_with = "stored_insights")]
    pub insights: Vec<ValidatedInsight>,
}

/// On-disk form of a validated insight.
#[derive(Deserialize)]
struct StoredInsight {
    rank: usize,
    factor: String,
    why_it_matters: String,
    #[serde(default)]
    evidence: String,
    confidence: Confidence,
}

/// Snapshot files are the one place validated insights are read back in.
fn stored_insights<'de, D>(deserializer: D) -> std::result::Result<Vec<ValidatedInsight>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredInsight>::deserialize(deserializer)?;
    Ok(stored
        .into_iter()
        .map(|s| ValidatedInsight::new(s.rank, s.factor, s.why_it_matters, s.evidence, s.confidence))
        .collect())
}

impl InsightSnapshot {
    /// Create a snapshot; the store assigns the final version on save.
    pub fn new(
        dataset_id: impl Into<String>,
        statistics: StatisticsSnapshot,
        columns: Vec<String>,
        insights: Vec<ValidatedInsight>,
    ) -> Result<Self> {
        let fingerprint = fingerprint(&statistics, &columns)?;
        Ok(Self {
            version: 0,
            dataset_id: dataset_id.into(),
            decision_metric: statistics.decision_metric.clone(),
            fingerprint,
            created_at: Utc::now(),
            columns,
            statistics,
            insights,
        })
    }

    /// Check whether the data has changed since this snapshot was taken.
    pub fn is_stale(&self, stats: &StatisticsSnapshot, columns: &[String]) -> Result<bool> {
        Ok(fingerprint(stats, columns)? != self.fingerprint)
    }
}

/// Compute a content fingerprint of the statistics and column set.
///
/// Column order does not affect the result.
pub fn fingerprint(stats: &StatisticsSnapshot, columns: &[String]) -> Result<String> {
    let mut sorted: Vec<&str> = columns.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(stats)?);
    hasher.update(b"\n");
    hasher.update(serde_json::to_vec(&sorted)?);
    Ok(format!("sha256:{:x}", hasher.finalize()))
}
