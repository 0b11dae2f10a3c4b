//! Sieve: deterministic validation and ranking of generated dataset insights.
//!
//! An insight generator (usually an LLM) proposes factors that explain a
//! decision metric. Sieve checks every proposal against the statistics
//! computed from the data and keeps only what the numbers support.
//!
//! # Core Principles
//!
//! - **Statistics are ground truth**: every kept insight names exactly one
//!   real column with a resolvable impact
//! - **Generator output is untrusted**: its ranks and confidence labels are
//!   discarded and recomputed
//! - **Deterministic**: identical inputs always yield identical output,
//!   including order and ranks
//!
//! # Example
//!
//! ```
//! use sieve::{CandidateInsight, StatisticsSnapshot, validate};
//!
//! let stats: StatisticsSnapshot = serde_json::from_str(r#"{
//!     "decision_metric": "revenue",
//!     "top_factors": [
//!         {"factor": "marketing_spend", "impact_score": 85.5, "type": "numeric", "abs_correlation": 0.855}
//!     ]
//! }"#).unwrap();
//! let columns = vec!["marketing_spend".to_string(), "region".to_string()];
//!
//! let raw = vec![
//!     CandidateInsight::new("marketing_spend", "Spend drives revenue").with_confidence("low"),
//!     CandidateInsight::new("marketing_spend region", "Both together"),
//! ];
//!
//! let insights = validate(&raw, &stats, &columns);
//! assert_eq!(insights.len(), 1);
//! assert_eq!(insights[0].rank(), 1);
//! assert_eq!(insights[0].confidence().to_string(), "high");
//! ```

pub mod error;
pub mod generator;
pub mod insight;
pub mod stats;
pub mod storage;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{InsightPipeline, PipelineConfig};
pub use error::{Result, SieveError};
pub use generator::{GenerationRequest, InsightGenerator, MockGenerator, MockGeneratorConfig};
pub use insight::{CandidateInsight, Confidence, ValidatedInsight, parse_candidates};
pub use stats::{FactorType, StatisticsSnapshot};
pub use storage::{InsightSnapshot, SnapshotStore};
pub use validation::{
    InsightValidator, Rejection, RejectionReason, Thresholds, ValidationReport,
    ValidationRequest, validate,
};
