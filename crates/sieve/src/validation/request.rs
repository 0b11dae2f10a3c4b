//! JSON exchange record for one validation call.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::insight::{CandidateInsight, parse_candidates};
use crate::stats::StatisticsSnapshot;

use super::engine::InsightValidator;
use super::rejection::ValidationReport;

/// Inputs for one validation call, as exchanged with callers.
///
/// Candidates come either as already-decoded `insights` or as the
/// generator's `raw_output` text. Both camelCase and snake_case field names
/// are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default, alias = "rawInsights", alias = "raw_insights")]
    pub insights: Vec<CandidateInsight>,

    #[serde(default, alias = "rawOutput", skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,

    #[serde(alias = "backendStats", alias = "backend_stats", alias = "statistics")]
    pub stats: StatisticsSnapshot,

    #[serde(default, alias = "datasetColumns", alias = "dataset_columns")]
    pub columns: Vec<String>,
}

impl ValidationRequest {
    pub fn new(stats: StatisticsSnapshot, columns: Vec<String>) -> Self {
        Self {
            stats,
            columns,
            ..Default::default()
        }
    }

    pub fn with_insights(mut self, insights: Vec<CandidateInsight>) -> Self {
        self.insights = insights;
        self
    }

    pub fn with_raw_output(mut self, raw_output: impl Into<String>) -> Self {
        self.raw_output = Some(raw_output.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a request from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            SieveError::Parse(format!("Invalid request {}: {}", path.display(), e))
        })
    }

    /// The distrusted candidate list.
    ///
    /// Decoded `insights` take precedence; otherwise `raw_output` is parsed.
    pub fn candidates(&self) -> Result<Vec<CandidateInsight>> {
        if !self.insights.is_empty() {
            return Ok(self.insights.clone());
        }
        match &self.raw_output {
            Some(text) if !text.trim().is_empty() => parse_candidates(text),
            _ => Ok(Vec::new()),
        }
    }

    /// Validate this request's candidates.
    pub fn validate(&self, validator: &InsightValidator) -> Result<ValidationReport> {
        let candidates = self.candidates()?;
        Ok(validator.validate_with_report(&candidates, &self.stats, &self.columns))
    }
}
