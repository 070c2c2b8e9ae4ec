//! Validation report and registry metrics.

use serde::{Deserialize, Serialize};

/// Outcome of validating a plan. Only cycles make a plan invalid; the other
/// findings are advisory suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

impl ValidationReport {
    /// Record a blocking issue.
    pub fn add_issue(&mut self, issue: impl Into<String>) {
        self.is_valid = false;
        self.issues.push(issue.into());
    }

    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }
}

/// Aggregate metrics over every plan in a registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlanMetrics {
    pub total_plans: usize,
    pub active_plans: usize,
    pub completed_plans: usize,
    /// Mean task count over all plans
    pub average_tasks_per_plan: f64,
    /// Mean creation-to-completion time of completed plans (ms)
    pub average_completion_time_ms: f64,
    /// Completed plans as a percentage of all plans
    pub success_rate: f64,
}
