//! MCP tool handlers

use std::sync::Arc;

use cairn_core::{
    display::{CreateResult, DeleteResult, OperationStatus, PlanSummaries, Tasks, UpdateResult},
    generation::StaticGenerator,
    params as core, PlanRegistry,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Transparent wrapper that gives core parameter types the derives the MCP
/// layer needs without tying the core to rmcp.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type AddTask = McpParams<core::AddTask>;
pub type UpdateTaskStatus = McpParams<core::UpdateTaskStatus>;

/// Generation request with an optional pre-computed response.
///
/// When `response` is set it is parsed instead of calling the configured
/// generator, so a client that produced the task breakdown itself can still
/// run it through the pipeline.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateTasks {
    #[serde(flatten)]
    pub params: core::GenerateTasks,
    /// Task breakdown in the `---` separated block format
    #[serde(default)]
    pub response: Option<String>,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
}

pub struct McpHandlers {
    registry: Arc<PlanRegistry>,
}

impl McpHandlers {
    pub fn new(registry: Arc<PlanRegistry>) -> Self {
        Self { registry }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let plan = self
            .registry
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        text(CreateResult::new(plan))
    }

    pub async fn generate_tasks(&self, Parameters(request): Parameters<GenerateTasks>) -> McpResult {
        debug!("generate_tasks: {:?}", request.params);

        let result = match &request.response {
            Some(response) => {
                let generator = StaticGenerator::new(response.clone());
                self.registry
                    .generate_tasks_with(&generator, &request.params)
                    .await
            }
            None => self.registry.generate_tasks(&request.params).await,
        };
        let tasks = result.map_err(|e| to_mcp_error("Failed to generate tasks", &e))?;

        text(format!(
            "# Generated {} tasks for plan {}\n\n{}",
            tasks.len(),
            request.params.plan_id,
            Tasks(tasks)
        ))
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {:?}", params);

        let task = self
            .registry
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;
        text(CreateResult::new(task))
    }

    pub async fn remove_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("remove_task: {:?}", params);

        let task = self
            .registry
            .remove_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove task", &e))?;
        text(DeleteResult::new(task))
    }

    pub async fn update_task_status(
        &self,
        Parameters(params): Parameters<UpdateTaskStatus>,
    ) -> McpResult {
        debug!("update_task_status: {:?}", params);

        let inner = params.as_ref();
        let task = self
            .registry
            .update_task_status(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        let mut changes = vec![format!("Status: {}", task.status)];
        if inner.notes.as_deref().is_some_and(|n| !n.trim().is_empty()) {
            changes.push("Added note".to_string());
        }
        text(UpdateResult::with_changes(task, changes))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("show_task: {:?}", params);

        let task = self
            .registry
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?;
        text(task)
    }

    pub async fn get_dependencies(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("get_dependencies: {:?}", params);

        let entry = self
            .registry
            .get_dependencies(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get dependencies", &e))?;
        text(entry)
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let plan = self
            .registry
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;
        text(plan)
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let inner = params.as_ref();
        let summaries = self
            .registry
            .list_plans(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = match &inner.status {
            Some(status) => format!("Plans ({status})"),
            None => "Plans".to_string(),
        };
        text(format!("# {title}\n\n{}", PlanSummaries(summaries)))
    }

    pub async fn optimize_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("optimize_plan: {:?}", params);

        let plan = self
            .registry
            .optimize_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to optimize plan", &e))?;
        text(plan)
    }

    pub async fn schedule_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("schedule_plan: {:?}", params);

        let tasks = self
            .registry
            .schedule_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to schedule plan", &e))?;
        text(format!("# Execution order\n\n{}", Tasks(tasks)))
    }

    pub async fn validate_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("validate_plan: {:?}", params);

        let report = self
            .registry
            .validate_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to validate plan", &e))?;
        text(report)
    }

    pub async fn cancel_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("cancel_plan: {:?}", params);

        let plan = self
            .registry
            .cancel_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to cancel plan", &e))?;
        text(OperationStatus::success(format!(
            "Cancelled plan '{}' (ID: {}). It no longer accepts changes.",
            plan.name, plan.id
        )))
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_plan: {:?}", params);

        let plan = self
            .registry
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;
        text(DeleteResult::new(plan))
    }

    pub async fn get_metrics(&self) -> McpResult {
        text(self.registry.get_metrics().await)
    }

    pub async fn generate_code(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("generate_code: {:?}", params);

        let code = self
            .registry
            .generate_code(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate code", &e))?;
        text(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(result: CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    fn params<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Parameters<T> {
        Parameters(serde_json::from_value(value).unwrap())
    }

    #[tokio::test]
    async fn test_generate_with_inline_response() {
        let handlers = McpHandlers::new(Arc::new(PlanRegistry::new()));

        let created = handlers
            .create_plan(params(serde_json::json!({ "name": "Inline" })))
            .await
            .unwrap();
        assert!(body(created).starts_with("Created plan with ID: plan_"));

        let plan_id = handlers.registry.list_plans(&core::ListPlans::default()).await.unwrap()[0]
            .id
            .clone();
        let generated = handlers
            .generate_tasks(params(serde_json::json!({
                "plan_id": plan_id,
                "requirements": "Ship it",
                "response": "TASK: Write release notes\nPRIORITY: low",
                "max_tasks": 3
            })))
            .await
            .unwrap();
        let output = body(generated);
        assert!(output.contains("# Generated 1 tasks"));
        assert!(output.contains("Write release notes"));
    }

    #[tokio::test]
    async fn test_unknown_plan_is_an_error() {
        let handlers = McpHandlers::new(Arc::new(PlanRegistry::new()));
        let result = handlers
            .show_plan(params(serde_json::json!({ "id": "plan_missing" })))
            .await;
        assert!(result.is_err());
    }
}
