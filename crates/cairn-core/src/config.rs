//! Tunable thresholds for the heuristic stages.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

pub const MINUTE_MS: u64 = 60 * 1000;
pub const HOUR_MS: u64 = 60 * MINUTE_MS;

/// Heuristic thresholds used by the estimator, risk assessor, consolidator
/// and validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base estimate for a task with no estimate (ms)
    pub base_estimate_ms: u64,
    /// Added to the estimate for each touched file (ms)
    pub per_file_estimate_ms: u64,
    /// Multiplier applied when the description mentions testing
    pub test_multiplier: f64,
    /// Multiplier applied to high priority tasks
    pub high_priority_multiplier: f64,
    /// Members at or above this estimate block consolidation (ms)
    pub consolidation_max_estimate_ms: u64,
    /// Tasks above this estimate are suggested for breakdown (ms)
    pub long_task_threshold_ms: u64,
    /// Tasks touching more files than this are at least medium risk
    pub risk_file_threshold: usize,
    /// Description keywords that mark a task as high risk
    pub risk_keywords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_estimate_ms: 2 * HOUR_MS,
            per_file_estimate_ms: 30 * MINUTE_MS,
            test_multiplier: 1.5,
            high_priority_multiplier: 1.2,
            consolidation_max_estimate_ms: 2 * HOUR_MS,
            long_task_threshold_ms: 8 * HOUR_MS,
            risk_file_threshold: 5,
            risk_keywords: vec![
                "integration".to_string(),
                "migration".to_string(),
                "refactor".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the heuristics meaningless.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("test_multiplier", self.test_multiplier),
            ("high_priority_multiplier", self.high_priority_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::invalid_input(field)
                    .with_reason(format!("must be a positive number, got {value}")));
            }
        }
        if self.base_estimate_ms == 0 {
            return Err(PlannerError::invalid_input("base_estimate_ms")
                .with_reason("must be greater than zero"));
        }
        Ok(())
    }
}
