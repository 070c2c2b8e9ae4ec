//! Plan model definition and lifecycle bookkeeping.

use std::collections::BTreeMap;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ids, PlanStatus, Task, TaskStatus};

/// Generation context recorded with a plan and handed to collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanContext {
    /// Kind of project (e.g. "web", "cli", "library")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    /// Framework in use (e.g. "axum", "react")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    /// Free-form complexity hint (e.g. "low", "high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
}

impl PlanContext {
    /// Fill unset fields from `fallback`, keeping fields already set.
    pub fn or(self, fallback: &PlanContext) -> PlanContext {
        PlanContext {
            project_type: self.project_type.or_else(|| fallback.project_type.clone()),
            framework: self.framework.or_else(|| fallback.framework.clone()),
            complexity: self.complexity.or_else(|| fallback.complexity.clone()),
        }
    }
}

/// A goal-scoped container of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Opaque unique identifier
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub context: PlanContext,

    #[serde(default)]
    pub status: PlanStatus,

    /// Percentage of completed tasks (0-100)
    #[serde(default)]
    pub progress: f64,

    /// Free-form metadata supplied by the caller
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,

    /// Task ids in plan order
    #[serde(default)]
    pub task_ids: Vec<String>,

    /// Task snapshot, filled when a plan is handed out by the registry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// When the plan last entered completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl Plan {
    /// A draft plan with a fresh id and no tasks.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        context: PlanContext,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: ids::plan_id(),
            name: name.into(),
            description: description.into(),
            context,
            status: PlanStatus::Draft,
            progress: 0.0,
            metadata: BTreeMap::new(),
            task_ids: Vec::new(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Recompute task ids, progress and lifecycle status from `tasks`.
    ///
    /// Cancelled plans keep their status; everything else follows the task
    /// set: all tasks completed means completed, any tasks at all means
    /// active, and a plan that never had tasks stays a draft.
    pub fn refresh(&mut self, tasks: &[Task], now: Timestamp) {
        self.task_ids = tasks.iter().map(|task| task.id.clone()).collect();

        let total = tasks.len();
        let completed = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();
        self.progress = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        self.updated_at = now;

        if self.status == PlanStatus::Cancelled {
            return;
        }

        let next = if total > 0 && completed == total {
            PlanStatus::Completed
        } else if total == 0 && self.status == PlanStatus::Draft {
            PlanStatus::Draft
        } else {
            PlanStatus::Active
        };

        match next {
            PlanStatus::Completed if self.status != PlanStatus::Completed => {
                self.completed_at = Some(now);
            }
            PlanStatus::Completed => {}
            _ => self.completed_at = None,
        }
        self.status = next;
    }

    /// Milliseconds from creation to completion, for completed plans.
    pub fn completion_time_ms(&self) -> Option<u64> {
        self.completed_at.map(|completed| {
            let elapsed = completed.as_millisecond() - self.created_at.as_millisecond();
            elapsed.max(0) as u64
        })
    }
}
