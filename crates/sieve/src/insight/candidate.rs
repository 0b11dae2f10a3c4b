//! Candidate insights as produced by the insight generator.
//!
//! Nothing in a candidate is trusted. Every field is optional and decoding
//! never fails on an individual record: wrong-typed fields simply become
//! `None`, and the validator decides what survives.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SieveError};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n?(.*?)```").unwrap());

/// An unverified insight proposed by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct CandidateInsight {
    /// Generator's own rank. Never reused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Value>,
    /// Free-text factor name; the only link back to a dataset column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
    /// Plain-language justification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    /// Supporting evidence text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Self-reported confidence. Never reused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

impl CandidateInsight {
    /// Create a candidate naming a factor.
    pub fn new(factor: impl Into<String>, why_it_matters: impl Into<String>) -> Self {
        Self {
            factor: Some(factor.into()),
            why_it_matters: Some(why_it_matters.into()),
            ..Default::default()
        }
    }

    /// Set the generator's rank.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(Value::from(rank));
        self
    }

    /// Set the evidence text.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// Set the self-reported confidence.
    pub fn with_confidence(mut self, confidence: impl Into<String>) -> Self {
        self.confidence = Some(confidence.into());
        self
    }

    /// Decode a candidate from arbitrary JSON without failing.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            rank: obj.get("rank").filter(|v| !v.is_null()).cloned(),
            factor: text("factor"),
            why_it_matters: text("why_it_matters"),
            evidence: text("evidence"),
            confidence: text("confidence"),
        }
    }
}

impl From<Value> for CandidateInsight {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Decode a list of candidates from JSON values.
pub fn candidates_from_values(values: &[Value]) -> Vec<CandidateInsight> {
    values.iter().map(CandidateInsight::from_value).collect()
}

/// Extract candidate insights from a generator's raw text output.
///
/// Handles markdown code fences, bare JSON, and JSON surrounded by prose.
/// Accepts a top-level array, an object with an `insights` array, or a
/// single insight object.
pub fn parse_candidates(text: &str) -> Result<Vec<CandidateInsight>> {
    let value = extract_json(text)
        .ok_or_else(|| SieveError::Parse("No JSON found in generator output".to_string()))?;

    match value {
        Value::Array(items) => Ok(candidates_from_values(&items)),
        Value::Object(ref obj) => match obj.get("insights") {
            Some(Value::Array(items)) => Ok(candidates_from_values(items)),
            Some(_) => Err(SieveError::Parse(
                "'insights' field is not an array".to_string(),
            )),
            None => Ok(vec![CandidateInsight::from_value(&value)]),
        },
        _ => Err(SieveError::Parse(
            "Expected a JSON array or object of insights".to_string(),
        )),
    }
}

/// Find the first decodable JSON document in free text.
fn extract_json(text: &str) -> Option<Value> {
    let fenced = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim());

    let bracketed = [('[', ']'), ('{', '}')]
        .into_iter()
        .filter_map(|(open, close)| {
            let start = text.find(open)?;
            let end = text.rfind(close)?;
            (start < end).then(|| &text[start..=end])
        });

    fenced
        .chain(std::iter::once(text.trim()))
        .chain(bracketed)
        .filter(|s| !s.is_empty())
        .find_map(|s| {
            serde_json::from_str::<Value>(s)
                .ok()
                .filter(|v| v.is_array() || v.is_object())
        })
}
