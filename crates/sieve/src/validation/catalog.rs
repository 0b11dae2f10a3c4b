//! Ground-truth factor catalog built from a statistics snapshot.
//!
//! The catalog answers two questions for the validator: is a factor name a
//! single real column (feature validation), and what is its authoritative
//! impact (impact resolution).

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::stats::{CorrelationEntry, FactorType, SegmentImpact, StatisticsSnapshot, TopFactor};

use super::rejection::HallucinationKind;

/// Which statistics table an impact was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSource {
    TopFactors,
    Correlations,
    SegmentImpacts,
}

/// Authoritative impact of one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    /// Always `Numeric` or `Categorical` once resolved.
    pub factor_type: FactorType,
    /// Ranking score on the provider's 0-100 scale.
    pub impact_score: f64,
    /// Normalized magnitude (0-1) used for confidence bands.
    pub magnitude: f64,
    pub source: ImpactSource,
}

/// Resolved view of the statistics snapshot plus the dataset's column list.
pub struct FactorCatalog<'a> {
    decision_metric: &'a str,
    /// Names a factor may legitimately take.
    accepted: HashSet<&'a str>,
    /// Names recognized when splitting composites, including the decision metric.
    recognized: IndexSet<&'a str>,
    impacts: IndexMap<&'a str, FactorImpact>,
}

impl<'a> FactorCatalog<'a> {
    /// Build a catalog for one validation call.
    pub fn build<S: AsRef<str>>(stats: &'a StatisticsSnapshot, columns: &'a [S]) -> Self {
        let decision_metric = stats.decision_metric.as_str();
        let stat_names = stats.factor_names();

        let mut accepted = HashSet::new();
        let mut recognized = IndexSet::new();
        let names = columns
            .iter()
            .map(|c| c.as_ref())
            .chain(stat_names.iter().copied())
            .chain(std::iter::once(decision_metric));
        for name in names.filter(|n| !n.is_empty()) {
            recognized.insert(name);
            if name != decision_metric {
                accepted.insert(name);
            }
        }

        let mean = stats
            .decision_metric_stats
            .mean
            .filter(|m| m.is_finite());

        let top = index_by(&stats.top_factors, |t| t.factor.as_str());
        let corr = index_by(&stats.all_correlations, |c| c.factor.as_str());
        let seg = index_by(&stats.all_segment_impacts, |s| s.factor.as_str());

        let mut impacts = IndexMap::new();
        for name in stat_names {
            if name.is_empty() || name == decision_metric {
                continue;
            }
            let resolved = resolve_impact(
                top.get(name).copied(),
                corr.get(name).copied(),
                seg.get(name).copied(),
                mean,
            );
            if let Some(impact) = resolved {
                impacts.insert(name, impact);
            }
        }

        Self {
            decision_metric,
            accepted,
            recognized,
            impacts,
        }
    }

    /// Check that a factor names exactly one known column.
    pub fn check_name(&self, factor: &str) -> Result<(), HallucinationKind> {
        if !self.decision_metric.is_empty() && factor == self.decision_metric {
            return Err(HallucinationKind::DecisionMetric);
        }

        let parts = self.recognized_parts(factor);
        if parts.len() > 1 {
            return Err(HallucinationKind::CompositeFactor { parts });
        }

        if self.accepted.contains(factor) {
            Ok(())
        } else {
            Err(HallucinationKind::UnknownFactor)
        }
    }

    /// Look up the resolved impact of a factor.
    pub fn resolve(&self, factor: &str) -> Option<&FactorImpact> {
        self.impacts.get(factor)
    }

    /// Number of factors with a resolvable impact.
    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    /// Distinct known names found in `factor` at word boundaries.
    ///
    /// Overlapping matches collapse to the leftmost-longest one, so a real
    /// column like `age_group` never splits into `age` and `group`.
    fn recognized_parts(&self, factor: &str) -> Vec<String> {
        let mut matches: Vec<(usize, usize, &str)> = Vec::new();
        for &name in &self.recognized {
            for (start, _) in factor.match_indices(name) {
                let end = start + name.len();
                if is_word_edge(factor, start, end) {
                    matches.push((start, end, name));
                }
            }
        }
        matches.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut parts: Vec<String> = Vec::new();
        let mut covered = 0;
        for (start, end, name) in matches {
            if start < covered {
                continue;
            }
            covered = end;
            if !parts.iter().any(|p| p == name) {
                parts.push(name.to_string());
            }
        }
        parts
    }
}

/// Index table entries by factor name. The first entry for a name wins.
fn index_by<'s, T>(entries: &'s [T], name: fn(&'s T) -> &'s str) -> HashMap<&'s str, &'s T> {
    let mut index = HashMap::with_capacity(entries.len());
    for entry in entries {
        index.entry(name(entry)).or_insert(entry);
    }
    index
}

/// True if `factor[start..end]` is delimited by boundaries on both sides.
fn is_word_edge(factor: &str, start: usize, end: usize) -> bool {
    let before = factor[..start].chars().next_back();
    let after = factor[end..].chars().next();
    before.is_none_or(is_separator) && after.is_none_or(is_separator)
}

fn is_separator(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_')
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Correlation magnitude, preferring the top-factor entry.
fn numeric_magnitude(top: Option<&TopFactor>, corr: Option<&CorrelationEntry>) -> Option<f64> {
    let from_top = top.and_then(|t| {
        finite(t.abs_correlation).or_else(|| finite(t.correlation))
    });
    let from_table = corr.and_then(|c| {
        finite(c.abs_correlation).or_else(|| finite(c.correlation))
    });
    from_top.or(from_table).map(f64::abs)
}

/// Relative segment impact in percent, preferring the top-factor entry.
///
/// Falls back to the mean difference relative to the decision-metric mean,
/// or the raw difference when that mean is zero or unknown.
fn categorical_pct(
    top: Option<&TopFactor>,
    seg: Option<&SegmentImpact>,
    metric_mean: Option<f64>,
) -> Option<f64> {
    let pct = top
        .and_then(|t| finite(t.relative_impact_pct))
        .or_else(|| seg.and_then(|s| finite(s.relative_impact_pct)));
    if let Some(pct) = pct {
        return Some(pct.abs());
    }

    let diff = top
        .and_then(|t| finite(t.mean_difference))
        .or_else(|| seg.and_then(|s| finite(s.mean_difference)))?;
    match metric_mean {
        Some(mean) if mean != 0.0 => Some((diff / mean).abs() * 100.0),
        _ => Some(diff.abs()),
    }
}

fn resolve_impact(
    top: Option<&TopFactor>,
    corr: Option<&CorrelationEntry>,
    seg: Option<&SegmentImpact>,
    metric_mean: Option<f64>,
) -> Option<FactorImpact> {
    match top {
        Some(top) => resolve_top_factor(top, corr, seg, metric_mean),
        None => resolve_from_tables(corr, seg, metric_mean),
    }
}

/// Resolve a factor listed in `top_factors`, keeping its precomputed score.
fn resolve_top_factor(
    top: &TopFactor,
    corr: Option<&CorrelationEntry>,
    seg: Option<&SegmentImpact>,
    metric_mean: Option<f64>,
) -> Option<FactorImpact> {
    let score = finite(top.impact_score);
    let numeric = numeric_magnitude(Some(top), corr);
    let categorical = categorical_pct(Some(top), seg, metric_mean).map(|pct| pct / 100.0);

    let (factor_type, magnitude) = match top.factor_type {
        FactorType::Numeric => (FactorType::Numeric, numeric),
        FactorType::Categorical => (FactorType::Categorical, categorical),
        FactorType::Unknown => match (numeric, categorical) {
            (Some(m), _) => (FactorType::Numeric, Some(m)),
            (None, Some(m)) => (FactorType::Categorical, Some(m)),
            (None, None) => return None,
        },
    };

    // Provider scores are on the magnitude x 100 scale for both types.
    let magnitude = magnitude.or_else(|| score.map(|s| s.abs() / 100.0))?;
    Some(FactorImpact {
        factor_type,
        impact_score: score.unwrap_or(magnitude * 100.0),
        magnitude,
        source: ImpactSource::TopFactors,
    })
}

/// Derive an impact from the raw correlation and segment tables.
fn resolve_from_tables(
    corr: Option<&CorrelationEntry>,
    seg: Option<&SegmentImpact>,
    metric_mean: Option<f64>,
) -> Option<FactorImpact> {
    let numeric = corr
        .filter(|c| c.factor_type != FactorType::Categorical)
        .and_then(|c| numeric_magnitude(None, Some(c)))
        .map(|magnitude| FactorImpact {
            factor_type: FactorType::Numeric,
            impact_score: magnitude * 100.0,
            magnitude,
            source: ImpactSource::Correlations,
        });

    let categorical = seg
        .filter(|s| s.factor_type != FactorType::Numeric)
        .and_then(|s| categorical_pct(None, Some(s), metric_mean))
        .map(|pct| FactorImpact {
            factor_type: FactorType::Categorical,
            impact_score: pct,
            magnitude: pct / 100.0,
            source: ImpactSource::SegmentImpacts,
        });

    match (numeric, categorical) {
        (Some(n), Some(c)) if c.impact_score > n.impact_score => Some(c),
        (Some(n), _) => Some(n),
        (None, c) => c,
    }
}
