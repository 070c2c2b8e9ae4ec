//! MCP server for Cairn
//!
//! Exposes the registry operations as Model Context Protocol tools over
//! stdio. Plans live for as long as the server process.

use std::sync::Arc;

use anyhow::Result;
use cairn_core::PlanRegistry;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddTask, CreatePlan, GenerateTasks, Id, ListPlans, McpHandlers, McpResult, TaskRef,
    UpdateTaskStatus,
};

#[derive(Clone)]
pub struct CairnMcpServer {
    registry: Arc<PlanRegistry>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CairnMcpServer {
    pub fn new(registry: PlanRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.registry.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create an empty draft plan. Requires a name; optionally a description, project_type, framework, complexity and free-form metadata. Returns the plan ID used by every other tool."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "generate_tasks",
        description = "Break a requirements text into tasks and add them to a plan. Tasks get duration estimates and risk tags unless estimate/assess_risk are false; set consolidate=true to merge small related tasks and max_tasks to cap the count. Pass 'response' with tasks in the block format (TASK:, DESCRIPTION:, PRIORITY:, DEPENDENCIES:, ESTIMATED_TIME:, FILES: lines, blocks separated by ---) to skip the configured generator."
    )]
    async fn generate_tasks(&self, params: Parameters<GenerateTasks>) -> McpResult {
        self.handlers().generate_tasks(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add one task to the end of a plan. Requires plan_id and title; optional description, priority (high, medium, low), files, prerequisites (IDs of tasks in the same plan) and estimated_duration_ms. Missing estimates are filled in and the task is risk-tagged."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "remove_task",
        description = "Remove a task from a plan. Other tasks that listed it as a prerequisite no longer do."
    )]
    async fn remove_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().remove_task(params).await
    }

    #[tool(
        name = "update_task_status",
        description = "Set a task's status to 'pending', 'in-progress' or 'completed', optionally appending a note. Plan progress and status follow: the plan completes when every task is completed."
    )]
    async fn update_task_status(&self, params: Parameters<UpdateTaskStatus>) -> McpResult {
        self.handlers().update_task_status(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show a single task with its status, estimate, risk, files, prerequisites and notes."
    )]
    async fn show_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "get_dependencies",
        description = "Show which tasks a task depends on (explicit prerequisites plus earlier tasks touching the same files) and which tasks depend on it."
    )]
    async fn get_dependencies(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().get_dependencies(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with its status, progress, context and all tasks in plan order."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List plan summaries, oldest first. Optionally filter by status: draft, active, completed or cancelled."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "optimize_plan",
        description = "Reorder a plan's tasks so every task follows its dependencies, then merge small related tasks. Fails without changing anything if the plan has a dependency cycle."
    )]
    async fn optimize_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().optimize_plan(params).await
    }

    #[tool(
        name = "schedule_plan",
        description = "Show the order in which a plan's tasks can be executed, without changing the plan. Fails if the plan has a dependency cycle."
    )]
    async fn schedule_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().schedule_plan(params).await
    }

    #[tool(
        name = "validate_plan",
        description = "Check a plan for dependency cycles (issues) and for low-priority orphan or overly long tasks (suggestions)."
    )]
    async fn validate_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().validate_plan(params).await
    }

    #[tool(
        name = "cancel_plan",
        description = "Cancel a plan. A cancelled plan can still be read but rejects every change."
    )]
    async fn cancel_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().cancel_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently remove a plan and all its tasks."
    )]
    async fn delete_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "get_metrics",
        description = "Aggregate metrics over all plans: counts by status, average tasks per plan, average completion time and success rate."
    )]
    async fn get_metrics(&self) -> McpResult {
        self.handlers().get_metrics().await
    }

    #[tool(
        name = "generate_code",
        description = "Ask the configured code generator for code implementing a task. On success a note is added to the task."
    )]
    async fn generate_code(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().generate_code(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CairnMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cairn".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Cairn breaks requirements into plans of dependent tasks.

## Core Concepts
- **Plans**: a goal with a status (draft, active, completed, cancelled) and a progress percentage
- **Tasks**: units of work with priority, files, prerequisites, estimate and risk
- **Dependencies**: explicit prerequisites, plus an implicit edge from an earlier task to a later one when both touch the same file

## Typical Workflow
1. `create_plan` with a name and optional project context
2. `generate_tasks` with the requirements text
3. `validate_plan` to catch cycles, then `optimize_plan` to reorder and merge
4. `schedule_plan` for the execution order
5. `update_task_status` as work progresses

Plans are kept in memory for the lifetime of this server."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: CairnMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Cairn MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tools_registered() {
        let server = CairnMcpServer::new(PlanRegistry::new());
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for expected in [
            "create_plan",
            "generate_tasks",
            "add_task",
            "update_task_status",
            "optimize_plan",
            "validate_plan",
            "get_metrics",
            "generate_code",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
        }
        assert_eq!(names.len(), 16);
    }
}
