//! Statistics snapshot types produced by the upstream statistics provider.

mod snapshot;
mod types;

pub use snapshot::{CorrelationEntry, MetricStats, SegmentImpact, StatisticsSnapshot, TopFactor};
pub use types::{ExcludedColumn, FactorType};
