//! Insight generator integration.
//!
//! The generator is whatever proposes insights, typically an LLM. Its output
//! is never trusted; [`crate::InsightPipeline`] always runs it through the
//! validator before anything reaches a consumer.

mod mock;
mod provider;

pub use mock::{MockGenerator, MockGeneratorConfig};
pub use provider::{GenerationRequest, InsightGenerator};
