//! Versioned persistence of validated insights.
//!
//! Storage sits outside the validation engine: callers decide when a
//! validated list is worth keeping and when a stored one is stale.

mod snapshot;
mod store;

pub use snapshot::{InsightSnapshot, fingerprint};
pub use store::SnapshotStore;
