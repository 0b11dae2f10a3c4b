//! Ground-truth statistics computed upstream for one decision metric.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{ExcludedColumn, FactorType};

/// Summary statistics of the decision metric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// An entry in the provider's ranked list of top factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFactor {
    /// Column name.
    pub factor: String,
    /// Precomputed composite impact score (0-100 scale).
    #[serde(default)]
    pub impact_score: Option<f64>,
    /// Numeric or categorical.
    #[serde(rename = "type", default)]
    pub factor_type: FactorType,
    /// Signed Pearson correlation (numeric factors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
    /// Correlation magnitude (numeric factors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_correlation: Option<f64>,
    /// Spread between highest and lowest segment means (categorical factors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_difference: Option<f64>,
    /// Segment spread relative to the overall mean, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_impact_pct: Option<f64>,
    /// Highest-mean segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_segments: Option<IndexMap<String, f64>>,
    /// Lowest-mean segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_segments: Option<IndexMap<String, f64>>,
}

/// Correlation between a numeric factor and the decision metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub factor: String,
    #[serde(default)]
    pub correlation: Option<f64>,
    #[serde(default)]
    pub abs_correlation: Option<f64>,
    #[serde(rename = "type", default)]
    pub factor_type: FactorType,
}

/// Decision-metric mean differences across the segments of a categorical factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentImpact {
    pub factor: String,
    #[serde(default)]
    pub mean_difference: Option<f64>,
    #[serde(default)]
    pub relative_impact_pct: Option<f64>,
    #[serde(rename = "type", default)]
    pub factor_type: FactorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_segments: Option<IndexMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_segments: Option<IndexMap<String, f64>>,
}

/// Statistics snapshot for one analysis request.
///
/// Produced by the statistics provider and treated as ground truth. Every
/// field has a serde default so partially populated snapshots still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Target column being explained.
    #[serde(default)]
    pub decision_metric: String,
    #[serde(default)]
    pub total_rows: usize,
    #[serde(default)]
    pub valid_rows: usize,
    #[serde(default)]
    pub missing_percentage: f64,
    #[serde(default)]
    pub outlier_count: usize,
    #[serde(default)]
    pub outlier_percentage: f64,
    /// Provider's authoritative ranking surface.
    #[serde(default)]
    pub top_factors: Vec<TopFactor>,
    #[serde(default)]
    pub all_correlations: Vec<CorrelationEntry>,
    #[serde(default)]
    pub all_segment_impacts: Vec<SegmentImpact>,
    #[serde(default)]
    pub excluded_columns: Vec<ExcludedColumn>,
    #[serde(default)]
    pub decision_metric_stats: MetricStats,
}

impl StatisticsSnapshot {
    /// Create an empty snapshot for a decision metric.
    pub fn new(decision_metric: impl Into<String>) -> Self {
        Self {
            decision_metric: decision_metric.into(),
            ..Default::default()
        }
    }

    /// All factor names across the three tables, deduplicated, in table order.
    pub fn factor_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.top_factors
            .iter()
            .map(|f| f.factor.as_str())
            .chain(self.all_correlations.iter().map(|c| c.factor.as_str()))
            .chain(self.all_segment_impacts.iter().map(|s| s.factor.as_str()))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Names of the columns excluded from analysis.
    pub fn excluded_names(&self) -> Vec<&str> {
        self.excluded_columns.iter().map(|c| c.name()).collect()
    }

    /// Look up a factor in the top factors list.
    pub fn top_factor(&self, name: &str) -> Option<&TopFactor> {
        self.top_factors.iter().find(|f| f.factor == name)
    }

    /// Look up a factor in the correlation table.
    pub fn correlation(&self, name: &str) -> Option<&CorrelationEntry> {
        self.all_correlations.iter().find(|c| c.factor == name)
    }

    /// Look up a factor in the segment impact table.
    pub fn segment_impact(&self, name: &str) -> Option<&SegmentImpact> {
        self.all_segment_impacts.iter().find(|s| s.factor == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER_JSON: &str = r#"{
        "decision_metric": "revenue",
        "total_rows": 1000,
        "valid_rows": 980,
        "missing_percentage": 2.0,
        "outlier_count": 12,
        "outlier_percentage": 1.22,
        "top_factors": [
            {"factor": "marketing_spend", "impact_score": 85.5, "type": "numeric",
             "correlation": 0.855, "abs_correlation": 0.855},
            {"factor": "region", "impact_score": 42.1, "type": "categorical",
             "mean_difference": 1200.5,
             "top_segments": {"West": 5200.0, "North": 4800.0},
             "bottom_segments": {"South": 4000.0}}
        ],
        "all_correlations": [
            {"factor": "marketing_spend", "correlation": 0.855, "abs_correlation": 0.855, "type": "numeric"},
            {"factor": "discount", "correlation": -0.12, "abs_correlation": 0.12, "type": "numeric"}
        ],
        "all_segment_impacts": [
            {"factor": "region", "mean_difference": 1200.5, "relative_impact_pct": 42.1, "type": "categorical"}
        ],
        "excluded_columns": [{"column": "order_id", "reason": "High uniqueness"}],
        "decision_metric_stats": {"mean": 4500.0, "median": 4400.0, "std": 800.0, "min": 100.0, "max": 9000.0}
    }"#;

    #[test]
    fn test_parse_provider_output() {
        let stats: StatisticsSnapshot = serde_json::from_str(PROVIDER_JSON).unwrap();

        assert_eq!(stats.decision_metric, "revenue");
        assert_eq!(stats.top_factors.len(), 2);
        assert_eq!(stats.top_factors[1].factor_type, FactorType::Categorical);
        assert_eq!(stats.decision_metric_stats.mean, Some(4500.0));

        let segments = stats.top_factors[1].top_segments.as_ref().unwrap();
        assert_eq!(segments.keys().next().map(String::as_str), Some("West"));
    }

    #[test]
    fn test_factor_names_deduplicated_in_order() {
        let stats: StatisticsSnapshot = serde_json::from_str(PROVIDER_JSON).unwrap();
        assert_eq!(
            stats.factor_names(),
            vec!["marketing_spend", "region", "discount"]
        );
        assert_eq!(stats.excluded_names(), vec!["order_id"]);
    }

    #[test]
    fn test_partial_snapshot_loads() {
        let stats: StatisticsSnapshot =
            serde_json::from_str(r#"{"decision_metric": "sales"}"#).unwrap();

        assert_eq!(stats.decision_metric, "sales");
        assert!(stats.top_factors.is_empty());
        assert!(stats.factor_names().is_empty());
    }

    #[test]
    fn test_lookups() {
        let stats: StatisticsSnapshot = serde_json::from_str(PROVIDER_JSON).unwrap();

        assert!(stats.top_factor("region").is_some());
        assert!(stats.correlation("region").is_none());
        assert_eq!(
            stats.segment_impact("region").and_then(|s| s.relative_impact_pct),
            Some(42.1)
        );
    }
}
