//! Fixed confidence bands and weak-signal floors.
//!
//! Magnitudes are on a 0-1 scale: `abs_correlation` for numeric factors and
//! `relative_impact_pct / 100` for categorical factors.

use crate::insight::Confidence;
use crate::stats::FactorType;

/// Numeric magnitude at or above which confidence is high.
pub const NUMERIC_HIGH: f64 = 0.30;
/// Numeric magnitude at or above which confidence is medium.
pub const NUMERIC_MEDIUM: f64 = 0.15;
/// Numeric magnitudes below this are suppressed.
pub const NUMERIC_FLOOR: f64 = 0.10;

/// Categorical magnitude at or above which confidence is high.
pub const CATEGORICAL_HIGH: f64 = 0.15;
/// Categorical magnitude at or above which confidence is medium.
pub const CATEGORICAL_MEDIUM: f64 = 0.10;
/// Categorical magnitudes below this are suppressed.
pub const CATEGORICAL_FLOOR: f64 = 0.05;

/// Confidence bands and suppression floor for one factor type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub high: f64,
    pub medium: f64,
    pub floor: f64,
}

impl Bands {
    /// Map a magnitude to a confidence label, or `None` if it is a weak signal.
    pub fn classify(&self, magnitude: f64) -> Option<Confidence> {
        if !magnitude.is_finite() || magnitude < self.floor {
            None
        } else if magnitude >= self.high {
            Some(Confidence::High)
        } else if magnitude >= self.medium {
            Some(Confidence::Medium)
        } else {
            Some(Confidence::Low)
        }
    }
}

/// Frozen threshold set used for one validator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub numeric: Bands,
    pub categorical: Bands,
}

impl Thresholds {
    /// The standard threshold set.
    pub const STANDARD: Thresholds = Thresholds {
        numeric: Bands {
            high: NUMERIC_HIGH,
            medium: NUMERIC_MEDIUM,
            floor: NUMERIC_FLOOR,
        },
        categorical: Bands {
            high: CATEGORICAL_HIGH,
            medium: CATEGORICAL_MEDIUM,
            floor: CATEGORICAL_FLOOR,
        },
    };

    /// Bands for a resolved factor type.
    ///
    /// Unknown types never reach this point; the catalog resolves every
    /// factor to numeric or categorical.
    pub fn bands(&self, factor_type: FactorType) -> &Bands {
        match factor_type {
            FactorType::Categorical => &self.categorical,
            FactorType::Numeric | FactorType::Unknown => &self.numeric,
        }
    }

    /// Classify a magnitude for a factor type.
    pub fn classify(&self, factor_type: FactorType, magnitude: f64) -> Option<Confidence> {
        self.bands(factor_type).classify(magnitude)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_bands() {
        let t = Thresholds::STANDARD;
        assert_eq!(t.classify(FactorType::Numeric, 0.75), Some(Confidence::High));
        assert_eq!(t.classify(FactorType::Numeric, 0.30), Some(Confidence::High));
        assert_eq!(t.classify(FactorType::Numeric, 0.20), Some(Confidence::Medium));
        assert_eq!(t.classify(FactorType::Numeric, 0.12), Some(Confidence::Low));
        assert_eq!(t.classify(FactorType::Numeric, 0.10), Some(Confidence::Low));
        assert_eq!(t.classify(FactorType::Numeric, 0.05), None);
    }

    #[test]
    fn test_categorical_bands() {
        let t = Thresholds::STANDARD;
        assert_eq!(t.classify(FactorType::Categorical, 0.15), Some(Confidence::High));
        assert_eq!(t.classify(FactorType::Categorical, 0.12), Some(Confidence::Medium));
        assert_eq!(t.classify(FactorType::Categorical, 0.07), Some(Confidence::Low));
        assert_eq!(t.classify(FactorType::Categorical, 0.04), None);
    }

    #[test]
    fn test_non_finite_is_weak() {
        let t = Thresholds::default();
        assert_eq!(t.classify(FactorType::Numeric, f64::NAN), None);
        assert_eq!(t.classify(FactorType::Numeric, f64::INFINITY), None);
    }
}
