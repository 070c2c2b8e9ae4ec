//! Plan summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus, Task, TaskStatus};

/// Summary information about a plan with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: PlanStatus,
    /// Percentage of completed tasks
    pub progress: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub pending_tasks: usize,
}

impl PlanSummary {
    /// Create a summary from a plan and its current tasks.
    pub fn from_plan(plan: &Plan, tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            status: plan.status,
            progress: plan.progress,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_tasks: tasks.len(),
            completed_tasks: count(TaskStatus::Completed),
            in_progress_tasks: count(TaskStatus::InProgress),
            pending_tasks: count(TaskStatus::Pending),
        }
    }
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self::from_plan(plan, &plan.tasks)
    }
}
