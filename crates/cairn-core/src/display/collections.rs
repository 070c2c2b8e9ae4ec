//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{PlanSummary, Task};

/// Newtype wrapper for displaying a list of plan summaries.
///
/// # Examples
///
/// ```rust
/// use cairn_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanContext, PlanSummary},
/// };
///
/// let plan = Plan::new("My Project", "A test project", PlanContext::default());
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// assert!(summaries.to_string().contains("My Project"));
/// assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying an ordered list of tasks, numbered in
/// list order (as returned by scheduling or generation).
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for (position, task) in self.0.iter().enumerate() {
            write!(f, "{}. {task}", position + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plan, PlanContext, TaskStatus};

    #[test]
    fn test_plan_summaries_display() {
        let first = Plan::new("Test Plan", "A test plan", PlanContext::default());
        let second = Plan::new("Second Plan", "", PlanContext::default());
        let summaries = PlanSummaries(vec![
            PlanSummary::from(&first),
            PlanSummary::from(&second),
        ]);
        let output = summaries.to_string();

        assert!(output.contains("## Test Plan"));
        assert!(output.contains("## Second Plan"));
        assert!(output.contains(&format!("ID: {}", first.id)));
        assert!(output.contains("- **Description**: A test plan"));
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_tasks_display() {
        assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");

        let mut done = Task::new("plan_1", "Second");
        done.status = TaskStatus::Completed;
        let output = Tasks(vec![Task::new("plan_1", "First"), done]).to_string();
        assert!(output.starts_with("1. ### First (○ Pending)"));
        assert!(output.contains("2. ### Second (✓ Completed)"));
    }
}
