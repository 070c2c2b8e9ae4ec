//! Parameter structures for registry operations.
//!
//! These are shared by every front-end (CLI, MCP) so that each interface only
//! adds its own framework derives on top. With the `schema` feature enabled
//! they also derive [`schemars::JsonSchema`] and can be used directly as MCP
//! tool parameters.

use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{PlanContext, PlanStatus, Priority, TaskStatus},
};

/// Parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: String,
}

/// Addresses a single task inside a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// ID of the plan owning the task
    pub plan_id: String,
    /// ID of the task
    pub task_id: String,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    /// Goal description of the plan
    #[serde(default)]
    pub description: Option<String>,
    /// Project type, framework and complexity hints for generation
    #[serde(flatten)]
    pub context: PlanContext,
    /// Free-form metadata stored with the plan
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl CreatePlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Reject plans without a usable name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Only list plans in this status ('draft', 'active', 'completed',
    /// 'cancelled'); all plans when omitted
    #[serde(default)]
    pub status: Option<String>,
}

impl ListPlans {
    /// Parse the optional status filter.
    pub fn validate(&self) -> Result<Option<PlanStatus>> {
        self.status
            .as_deref()
            .map(|status| {
                PlanStatus::from_str(status)
                    .map_err(|reason| PlannerError::invalid_input("status").with_reason(reason))
            })
            .transpose()
    }
}

fn default_true() -> bool {
    true
}

/// Knobs for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateOptions {
    /// Overrides the plan's project type for this run
    #[serde(default)]
    pub project_type: Option<String>,
    /// Overrides the plan's framework for this run
    #[serde(default)]
    pub framework: Option<String>,
    /// Overrides the plan's complexity hint for this run
    #[serde(default)]
    pub complexity: Option<String>,
    /// Keep at most this many parsed tasks
    #[serde(default)]
    pub max_tasks: Option<usize>,
    /// Fill in missing duration estimates (default: true)
    #[serde(default = "default_true")]
    pub estimate: bool,
    /// Tag every task with a risk level (default: true)
    #[serde(default = "default_true")]
    pub assess_risk: bool,
    /// Merge small homogeneous tasks after integration (default: false)
    #[serde(default)]
    pub consolidate: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            project_type: None,
            framework: None,
            complexity: None,
            max_tasks: None,
            estimate: true,
            assess_risk: true,
            consolidate: false,
        }
    }
}

impl GenerateOptions {
    /// Context overrides carried by these options.
    pub fn context(&self) -> PlanContext {
        PlanContext {
            project_type: self.project_type.clone(),
            framework: self.framework.clone(),
            complexity: self.complexity.clone(),
        }
    }
}

/// Parameters for generating tasks from a requirements text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateTasks {
    /// ID of the plan receiving the tasks
    pub plan_id: String,
    /// Natural-language requirements to decompose
    pub requirements: String,
    #[serde(flatten)]
    pub options: GenerateOptions,
}

/// Parameters for adding a single task to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// ID of the plan to add the task to
    pub plan_id: String,
    /// Title of the task (required)
    pub title: String,
    /// Detailed description
    #[serde(default)]
    pub description: Option<String>,
    /// 'high', 'medium' or 'low' (default: medium)
    #[serde(default)]
    pub priority: Option<String>,
    /// Files the task touches
    #[serde(default)]
    pub files: Vec<String>,
    /// IDs of tasks that must complete first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Estimated duration in milliseconds
    #[serde(default)]
    pub estimated_duration_ms: Option<u64>,
}

impl AddTask {
    /// Check the title and parse the priority.
    pub fn validate(&self) -> Result<Priority> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("must not be empty"));
        }
        match &self.priority {
            Some(priority) => Priority::from_str(priority)
                .map_err(|reason| PlannerError::invalid_input("priority").with_reason(reason)),
            None => Ok(Priority::default()),
        }
    }
}

/// Parameters for changing a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTaskStatus {
    /// ID of the plan owning the task
    pub plan_id: String,
    /// ID of the task to update
    pub task_id: String,
    /// New status: 'pending', 'in-progress' or 'completed'
    pub status: String,
    /// Optional note appended to the task
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateTaskStatus {
    /// Parse the requested status.
    pub fn validate(&self) -> Result<TaskStatus> {
        TaskStatus::from_str(&self.status).map_err(|_| {
            PlannerError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be 'pending', 'in-progress' or 'completed'",
                self.status
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_plan_requires_name() {
        let err = CreatePlan::new("   ").validate().unwrap_err();
        match err {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "name"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
        assert!(CreatePlan::new("Launch").validate().is_ok());
    }

    #[test]
    fn test_create_plan_flattened_context() {
        let params: CreatePlan = serde_json::from_value(serde_json::json!({
            "name": "Shop",
            "project_type": "web",
            "framework": "axum"
        }))
        .unwrap();
        assert_eq!(params.context.project_type.as_deref(), Some("web"));
        assert_eq!(params.context.framework.as_deref(), Some("axum"));
        assert!(params.metadata.is_empty());
    }

    #[test]
    fn test_generate_options_defaults() {
        let params: GenerateTasks = serde_json::from_value(serde_json::json!({
            "plan_id": "plan_1",
            "requirements": "build a thing"
        }))
        .unwrap();
        assert!(params.options.estimate);
        assert!(params.options.assess_risk);
        assert!(!params.options.consolidate);
        assert_eq!(params.options.max_tasks, None);
        assert_eq!(params.options, GenerateOptions::default());
    }

    #[test]
    fn test_update_status_validate() {
        let mut params = UpdateTaskStatus {
            plan_id: "p".to_string(),
            task_id: "t".to_string(),
            status: "in-progress".to_string(),
            notes: None,
        };
        assert_eq!(params.validate().unwrap(), TaskStatus::InProgress);

        params.status = "blocked".to_string();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid status: blocked"));
    }

    #[test]
    fn test_add_task_validate() {
        let mut params = AddTask {
            plan_id: "p".to_string(),
            title: "Write docs".to_string(),
            ..AddTask::default()
        };
        assert_eq!(params.validate().unwrap(), Priority::Medium);

        params.priority = Some("urgent".to_string());
        assert!(params.validate().is_err());

        params.priority = Some("low".to_string());
        params.title = String::new();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_list_plans_filter() {
        let params = ListPlans {
            status: Some("active".to_string()),
        };
        assert_eq!(params.validate().unwrap(), Some(PlanStatus::Active));
        assert_eq!(ListPlans::default().validate().unwrap(), None);
        assert!(ListPlans {
            status: Some("archived".to_string())
        }
        .validate()
        .is_err());
    }
}
