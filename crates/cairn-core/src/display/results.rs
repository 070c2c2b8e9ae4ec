//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Plan, Task};

/// Result of a create operation: a confirmation line followed by the new
/// resource.
///
/// ```rust
/// use cairn_core::{
///     display::CreateResult,
///     models::{Plan, PlanContext},
/// };
///
/// let plan = Plan::new("New Project", "", PlanContext::default());
/// let output = CreateResult::new(plan.clone()).to_string();
/// assert!(output.starts_with(&format!("Created plan with ID: {}", plan.id)));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of a task status change.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of a delete or remove operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {}) with {} tasks",
            self.resource.name,
            self.resource.id,
            self.resource.tasks.len()
        )
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed task '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanContext, TaskStatus};

    #[test]
    fn test_update_result_lists_changes() {
        let mut task = Task::new("plan_1", "Ship it");
        task.status = TaskStatus::InProgress;
        let output = UpdateResult::with_changes(task, vec!["Status: in-progress".to_string()])
            .to_string();
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Status: in-progress"));
        assert!(output.contains("### Ship it (➤ In Progress)"));

        let plain = UpdateResult::new(Task::new("plan_1", "Quiet")).to_string();
        assert!(!plain.contains("Changes made:"));
    }

    #[test]
    fn test_delete_results() {
        let plan = Plan::new("Old", "", PlanContext::default());
        assert!(DeleteResult::new(plan)
            .to_string()
            .contains("Deleted plan 'Old'"));

        let task = Task::new("plan_1", "Gone");
        assert!(DeleteResult::new(task)
            .to_string()
            .starts_with("Removed task 'Gone'"));
    }
}
