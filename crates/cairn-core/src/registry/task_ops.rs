//! Task-level operations for the registry.

use jiff::Timestamp;
use log::info;

use super::PlanRegistry;
use crate::{
    error::{PlannerError, Result},
    models::{Task, TaskDependency},
    params::{AddTask, TaskRef, UpdateTaskStatus},
};

impl PlanRegistry {
    /// Adds a single task to the end of a plan.
    ///
    /// Missing estimates are filled in and the task is risk-tagged. Every
    /// prerequisite must name a task already in the plan.
    pub async fn add_task(&self, params: &AddTask) -> Result<Task> {
        let priority = params.validate()?;

        let state = self.plan_state(&params.plan_id).await?;
        let mut state = state.lock().await;
        state.ensure_mutable()?;

        if let Some(unknown) = params
            .prerequisites
            .iter()
            .find(|id| !state.store.contains(id))
        {
            return Err(PlannerError::invalid_input("prerequisites")
                .with_reason(format!("task {unknown} is not part of plan {}", params.plan_id)));
        }

        let mut task = Task::new(&params.plan_id, params.title.trim())
            .with_description(params.description.clone().unwrap_or_default())
            .with_priority(priority)
            .with_files(params.files.iter().cloned())
            .with_prerequisites(params.prerequisites.iter().cloned());
        task.estimated_duration_ms = params.estimated_duration_ms;
        self.estimator.apply(std::slice::from_mut(&mut task));
        self.risk.apply(std::slice::from_mut(&mut task));

        let task_id = task.id.clone();
        state.store.push(task);
        state.rebuild_graph();
        state.refresh(Timestamp::now());

        info!("Added task {} to plan {}", task_id, params.plan_id);
        state.task(&task_id).cloned()
    }

    /// Removes a task and every prerequisite reference to it.
    pub async fn remove_task(&self, params: &TaskRef) -> Result<Task> {
        let state = self.plan_state(&params.plan_id).await?;
        let mut state = state.lock().await;
        state.ensure_mutable()?;

        let removed = state
            .store
            .remove(&params.task_id)
            .ok_or_else(|| PlannerError::task_not_found(&params.plan_id, &params.task_id))?;

        let mut tasks = state.store.take_all();
        for task in &mut tasks {
            task.prerequisites.retain(|id| id != &removed.id);
        }
        state.store.replace_all(tasks);
        state.rebuild_graph();
        state.refresh(Timestamp::now());

        info!("Removed task {} from plan {}", removed.id, params.plan_id);
        Ok(removed)
    }

    /// Moves a task to a new status, optionally appending a note.
    ///
    /// Progress and plan status are recomputed; the dependency graph is not
    /// rebuilt since no edge depends on status.
    pub async fn update_task_status(&self, params: &UpdateTaskStatus) -> Result<Task> {
        let status = params.validate()?;

        let state = self.plan_state(&params.plan_id).await?;
        let mut state = state.lock().await;
        state.ensure_mutable()?;

        let now = Timestamp::now();
        let task = state
            .store
            .get_mut(&params.task_id)
            .ok_or_else(|| PlannerError::task_not_found(&params.plan_id, &params.task_id))?;
        task.apply_status(status, now);
        if let Some(note) = params.notes.as_deref().map(str::trim) {
            if !note.is_empty() {
                task.add_note(note, now);
            }
        }
        let updated = task.clone();

        state.refresh(now);
        info!(
            "Task {} is now {} (plan {} at {:.0}%)",
            updated.id,
            status.as_str(),
            params.plan_id,
            state.plan.progress
        );
        Ok(updated)
    }

    /// Retrieves a single task.
    pub async fn get_task(&self, params: &TaskRef) -> Result<Task> {
        let state = self.plan_state(&params.plan_id).await?;
        let state = state.lock().await;
        state.task(&params.task_id).cloned()
    }

    /// Dependency entry of a single task.
    pub async fn get_dependencies(&self, params: &TaskRef) -> Result<TaskDependency> {
        let state = self.plan_state(&params.plan_id).await?;
        let state = state.lock().await;
        state
            .graph
            .get(&params.task_id)
            .cloned()
            .ok_or_else(|| PlannerError::task_not_found(&params.plan_id, &params.task_id))
    }
}
