//! Builder for creating and configuring [`PlanRegistry`] instances.

use std::sync::Arc;

use super::PlanRegistry;
use crate::{
    config::EngineConfig,
    error::Result,
    generation::{CodeGenerator, TaskGenerator},
    heuristics::{GroupingStrategy, TaskConsolidator},
};

/// Wires thresholds and collaborators into a [`PlanRegistry`].
#[derive(Clone, Default)]
pub struct PlanRegistryBuilder {
    config: EngineConfig,
    task_generator: Option<Arc<dyn TaskGenerator>>,
    code_generator: Option<Arc<dyn CodeGenerator>>,
    grouping: Option<Arc<dyn GroupingStrategy>>,
}

impl PlanRegistryBuilder {
    /// Creates a new builder with default thresholds and no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the heuristic thresholds.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the collaborator used by `generate_tasks`.
    pub fn with_task_generator(mut self, generator: Arc<dyn TaskGenerator>) -> Self {
        self.task_generator = Some(generator);
        self
    }

    /// Sets the collaborator used by `generate_code`.
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = Some(generator);
        self
    }

    /// Replaces the first-word grouping used by consolidation.
    pub fn with_grouping_strategy(mut self, strategy: Arc<dyn GroupingStrategy>) -> Self {
        self.grouping = Some(strategy);
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the configuration is invalid
    pub fn build(self) -> Result<PlanRegistry> {
        self.config.validate()?;

        let consolidator = match self.grouping {
            Some(strategy) => TaskConsolidator::with_strategy(&self.config, strategy),
            None => TaskConsolidator::new(&self.config),
        };

        Ok(PlanRegistry::from_parts(
            self.config,
            self.task_generator,
            self.code_generator,
            consolidator,
        ))
    }
}
