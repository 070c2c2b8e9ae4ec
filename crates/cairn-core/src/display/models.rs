//! Display implementations for domain models.
//!
//! Every implementation produces markdown, rendered by the CLI's terminal
//! renderer or returned verbatim to MCP clients.

use std::fmt;

use super::datetime::{HumanDuration, LocalDateTime};
use crate::models::{
    Plan, PlanContext, PlanMetrics, PlanStatus, PlanSummary, Priority, RiskLevel, Task,
    TaskDependency, TaskStatus, ValidationReport,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn write_id_list(f: &mut fmt::Formatter<'_>, label: &str, ids: &[String]) -> fmt::Result {
    if ids.is_empty() {
        writeln!(f, "- {label}: none")
    } else {
        let ids: Vec<String> = ids.iter().map(|id| format!("`{id}`")).collect();
        writeln!(f, "- {label}: {}", ids.join(", "))
    }
}

impl PlanContext {
    fn fmt_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(project_type) = &self.project_type {
            writeln!(f, "- Project type: {project_type}")?;
        }
        if let Some(framework) = &self.framework {
            writeln!(f, "- Framework: {framework}")?;
        }
        if let Some(complexity) = &self.complexity {
            writeln!(f, "- Complexity: {complexity}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- Status: {} ({:.0}%)", self.status, self.progress)?;
        self.context.fmt_fields(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- ID: `{}`", self.id)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        if let Some(estimate) = self.estimated_duration_ms {
            writeln!(f, "- Estimate: {}", HumanDuration(estimate))?;
        }
        if let Some(actual) = self.actual_duration_ms {
            writeln!(f, "- Actual: {}", HumanDuration(actual))?;
        }
        if let Some(risk) = self.risk {
            writeln!(f, "- Risk: {risk}")?;
        }
        if !self.prerequisites.is_empty() {
            write_id_list(f, "Depends on", &self.prerequisites)?;
        }
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        if !self.files.is_empty() {
            writeln!(f, "#### Files")?;
            writeln!(f)?;
            for file in &self.files {
                writeln!(f, "- `{file}`")?;
            }
            writeln!(f)?;
        }

        if !self.notes.is_empty() {
            writeln!(f, "#### Notes")?;
            writeln!(f)?;
            for note in &self.notes {
                writeln!(f, "- {note}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.completed_tasks, self.total_tasks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status)?;
        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        if self.in_progress_tasks > 0 {
            writeln!(f, "- **In progress**: {}", self.in_progress_tasks)?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_valid { "valid" } else { "invalid" };
        writeln!(f, "## Validation: {verdict}")?;
        writeln!(f)?;

        if self.issues.is_empty() && self.suggestions.is_empty() {
            return writeln!(f, "No issues found.");
        }

        if !self.issues.is_empty() {
            writeln!(f, "### Issues")?;
            writeln!(f)?;
            for issue in &self.issues {
                writeln!(f, "- {issue}")?;
            }
            writeln!(f)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f, "### Suggestions")?;
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "- {suggestion}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Metrics")?;
        writeln!(f)?;
        writeln!(f, "- Total plans: {}", self.total_plans)?;
        writeln!(f, "- Active plans: {}", self.active_plans)?;
        writeln!(f, "- Completed plans: {}", self.completed_plans)?;
        writeln!(
            f,
            "- Average tasks per plan: {:.1}",
            self.average_tasks_per_plan
        )?;
        writeln!(
            f,
            "- Average completion time: {}",
            HumanDuration(self.average_completion_time_ms.round() as u64)
        )?;
        writeln!(f, "- Success rate: {:.1}%", self.success_rate)
    }
}

impl fmt::Display for TaskDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Dependencies of `{}`", self.task_id)?;
        writeln!(f)?;
        write_id_list(f, "Depends on", &self.depends_on)?;
        write_id_list(f, "Dependents", &self.dependents)?;
        write_id_list(f, "Prerequisites", &self.prerequisites)
    }
}
