//! Pre-handoff checks on a plan's tasks.

use log::debug;

use crate::{
    config::EngineConfig,
    display::HumanDuration,
    graph::{detect_cycles, DependencyGraph},
    models::{Priority, Task, ValidationReport},
};

/// Checks a plan for dependency cycles and flags questionable tasks.
///
/// Only cycles make a plan invalid. Orphaned low-priority tasks and tasks
/// above the long-task threshold are reported as suggestions.
#[derive(Debug, Clone)]
pub struct PlanValidator {
    long_task_threshold_ms: u64,
}

impl Default for PlanValidator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl PlanValidator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            long_task_threshold_ms: config.long_task_threshold_ms,
        }
    }

    /// Validate `tasks` against the graph built from them.
    pub fn validate(&self, tasks: &[Task], graph: &DependencyGraph) -> ValidationReport {
        let mut report = ValidationReport::default();

        let cycle = detect_cycles(graph);
        if !cycle.is_empty() {
            report.add_issue(format!(
                "Circular dependency detected involving tasks: {}",
                cycle.join(", ")
            ));
        }

        for task in tasks {
            if task.priority == Priority::Low
                && !graph.has_edges(&task.id)
                && !task.description.to_lowercase().contains("optional")
            {
                report.add_suggestion(format!(
                    "Task '{}' ({}) has no dependencies and low priority; consider removing it or marking it optional",
                    task.title, task.id
                ));
            }

            if let Some(estimate) = task.estimated_duration_ms {
                if estimate > self.long_task_threshold_ms {
                    report.add_suggestion(format!(
                        "Task '{}' ({}) is estimated at {}; consider breaking it into smaller tasks",
                        task.title,
                        task.id,
                        HumanDuration(estimate)
                    ));
                }
            }
        }

        debug!(
            "Validated {} tasks: valid={}, {} issues, {} suggestions",
            tasks.len(),
            report.is_valid,
            report.issues.len(),
            report.suggestions.len()
        );
        report
    }
}
