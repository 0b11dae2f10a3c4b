//! Validation and ranking of candidate insights against ground-truth statistics.

mod catalog;
mod engine;
mod rejection;
mod request;
mod thresholds;

pub use catalog::{FactorCatalog, FactorImpact, ImpactSource};
pub use engine::{InsightValidator, validate};
pub use rejection::{HallucinationKind, Rejection, RejectionReason, ValidationReport};
pub use request::ValidationRequest;
pub use thresholds::{
    Bands, CATEGORICAL_FLOOR, CATEGORICAL_HIGH, CATEGORICAL_MEDIUM, NUMERIC_FLOOR, NUMERIC_HIGH,
    NUMERIC_MEDIUM, Thresholds,
};
