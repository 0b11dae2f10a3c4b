//! Generator-to-validator pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, SieveError};
use crate::generator::{GenerationRequest, InsightGenerator};
use crate::stats::StatisticsSnapshot;
use crate::validation::{InsightValidator, Thresholds, ValidationReport};

/// Configuration for an insight pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Confidence bands and weak-signal floors.
    pub thresholds: Thresholds,
    /// Maximum number of insights requested from the generator.
    pub max_insights: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::STANDARD,
            max_insights: 5,
        }
    }
}

/// Runs a generator and validates everything it produces.
pub struct InsightPipeline {
    config: PipelineConfig,
    validator: InsightValidator,
    generator: Option<Arc<dyn InsightGenerator>>,
}

impl InsightPipeline {
    /// Create a pipeline with default configuration and no generator.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            validator: InsightValidator::with_thresholds(config.thresholds),
            config,
            generator: None,
        }
    }

    /// Attach the generator that proposes candidates.
    pub fn with_generator(mut self, generator: impl InsightGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Attach a generator shared with other pipelines.
    pub fn with_shared_generator(mut self, generator: Arc<dyn InsightGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Generate candidates and validate them.
    pub fn run(&self, stats: &StatisticsSnapshot, columns: &[String]) -> Result<ValidationReport> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| SieveError::Config("No insight generator configured".to_string()))?;

        let request =
            GenerationRequest::new(stats, columns).with_max_insights(self.config.max_insights);
        let candidates = generator.generate(&request).map_err(|e| {
            warn!(generator = generator.name(), error = %e, "insight generation failed");
            SieveError::Config(format!("Generator '{}' failed: {}", generator.name(), e))
        })?;
        debug!(
            generator = generator.name(),
            candidates = candidates.len(),
            "generated candidates"
        );

        Ok(self.validator.validate_with_report(&candidates, stats, columns))
    }
}

impl Default for InsightPipeline {
    fn default() -> Self {
        Self::new()
    }
}
