//! Core type definitions for statistics entries.

use serde::{Deserialize, Serialize};

/// Kind of explanatory factor as classified by the statistics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorType {
    /// Numeric column, measured by correlation with the decision metric.
    Numeric,
    /// Categorical column, measured by segment mean differences.
    Categorical,
    /// Any other label the provider emitted (e.g. "datetime").
    #[serde(other)]
    Unknown,
}

impl Default for FactorType {
    fn default() -> Self {
        FactorType::Unknown
    }
}

/// A column the provider deliberately left out of analysis.
///
/// The provider emits either a bare column name or an object carrying the
/// reason for exclusion; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcludedColumn {
    /// Name only.
    Named(String),
    /// Name plus exclusion reason (e.g. "High uniqueness").
    Detailed {
        column: String,
        #[serde(default)]
        reason: String,
    },
}

impl ExcludedColumn {
    /// Get the excluded column name.
    pub fn name(&self) -> &str {
        match self {
            ExcludedColumn::Named(name) => name,
            ExcludedColumn::Detailed { column, .. } => column,
        }
    }

    /// Get the exclusion reason, if one was given.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ExcludedColumn::Named(_) => None,
            ExcludedColumn::Detailed { reason, .. } if !reason.is_empty() => Some(reason),
            ExcludedColumn::Detailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_factor_type() {
        let parsed: FactorType = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(parsed, FactorType::Unknown);

        let parsed: FactorType = serde_json::from_str("\"categorical\"").unwrap();
        assert_eq!(parsed, FactorType::Categorical);
    }

    #[test]
    fn test_excluded_column_shapes() {
        let columns: Vec<ExcludedColumn> = serde_json::from_str(
            r#"["customer_id", {"column": "product_url", "reason": "URL column"}]"#,
        )
        .unwrap();

        assert_eq!(columns[0].name(), "customer_id");
        assert_eq!(columns[0].reason(), None);
        assert_eq!(columns[1].name(), "product_url");
        assert_eq!(columns[1].reason(), Some("URL column"));
    }
}
