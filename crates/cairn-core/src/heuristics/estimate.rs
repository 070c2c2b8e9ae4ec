//! Duration estimates for tasks that have none.

use crate::{
    config::EngineConfig,
    models::{Priority, Task},
};

/// Fills in missing duration estimates from file count, description and
/// priority. Existing estimates are never touched, so applying it twice is
/// the same as applying it once.
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    base_ms: u64,
    per_file_ms: u64,
    test_multiplier: f64,
    high_priority_multiplier: f64,
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DurationEstimator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base_ms: config.base_estimate_ms,
            per_file_ms: config.per_file_estimate_ms,
            test_multiplier: config.test_multiplier,
            high_priority_multiplier: config.high_priority_multiplier,
        }
    }

    /// Heuristic estimate for `task` in milliseconds, ignoring any estimate it
    /// already has.
    pub fn estimate(&self, task: &Task) -> u64 {
        let files = task.files.len() as u64;
        let mut estimate = (self.base_ms + self.per_file_ms * files) as f64;

        if task.description.to_lowercase().contains("test") {
            estimate *= self.test_multiplier;
        }
        if task.priority == Priority::High {
            estimate *= self.high_priority_multiplier;
        }

        estimate.round() as u64
    }

    /// Estimate every task without one. Returns how many were filled in.
    pub fn apply(&self, tasks: &mut [Task]) -> usize {
        let mut filled = 0;
        for task in tasks.iter_mut().filter(|t| t.estimated_duration_ms.is_none()) {
            task.estimated_duration_ms = Some(self.estimate(task));
            filled += 1;
        }
        filled
    }
}
