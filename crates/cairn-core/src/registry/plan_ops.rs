//! Plan-level operations for the registry.

use std::sync::Arc;

use jiff::Timestamp;
use log::{info, warn};
use tokio::sync::Mutex;

use super::{PlanRegistry, PlanState};
use crate::{
    error::{PlannerError, Result},
    graph,
    models::{Plan, PlanMetrics, PlanStatus, PlanSummary, Task, ValidationReport},
    params::{CreatePlan, Id, ListPlans},
};

impl PlanRegistry {
    /// Creates a new draft plan.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        params.validate()?;

        let mut plan = Plan::new(
            params.name.trim(),
            params.description.clone().unwrap_or_default(),
            params.context.clone(),
        );
        plan.metadata = params.metadata.clone();

        let snapshot = plan.clone();
        self.plans
            .write()
            .await
            .insert(plan.id.clone(), Arc::new(Mutex::new(PlanState::new(plan))));

        info!("Created plan {} ({})", snapshot.id, snapshot.name);
        Ok(snapshot)
    }

    /// Retrieves a plan with its tasks.
    pub async fn get_plan(&self, params: &Id) -> Result<Plan> {
        let state = self.plan_state(&params.id).await?;
        let state = state.lock().await;
        Ok(state.snapshot())
    }

    /// Lists plan summaries, oldest first, optionally filtered by status.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<PlanSummary>> {
        let status = params.validate()?;

        let mut summaries = Vec::new();
        for state in self.all_states().await {
            let state = state.lock().await;
            if status.map_or(true, |status| state.plan.status == status) {
                summaries.push(PlanSummary::from_plan(&state.plan, state.store.as_slice()));
            }
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Removes a plan and all its tasks, returning the final snapshot.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        let state = self
            .plans
            .write()
            .await
            .remove(&params.id)
            .ok_or_else(|| PlannerError::plan_not_found(&params.id))?;

        let snapshot = state.lock().await.snapshot();
        info!("Deleted plan {} ({} tasks)", snapshot.id, snapshot.tasks.len());
        Ok(snapshot)
    }

    /// Marks a plan cancelled. Cancelling twice is a no-op.
    pub async fn cancel_plan(&self, params: &Id) -> Result<Plan> {
        let state = self.plan_state(&params.id).await?;
        let mut state = state.lock().await;

        if state.plan.status != PlanStatus::Cancelled {
            state.plan.status = PlanStatus::Cancelled;
            state.plan.completed_at = None;
            state.plan.updated_at = Timestamp::now();
            info!("Cancelled plan {}", state.plan.id);
        }
        Ok(state.snapshot())
    }

    /// Checks the plan for cycles and advisory findings.
    pub async fn validate_plan(&self, params: &Id) -> Result<ValidationReport> {
        let state = self.plan_state(&params.id).await?;
        let state = state.lock().await;

        let report = self.validator.validate(state.store.as_slice(), &state.graph);
        if report.is_valid {
            info!(
                "Plan {} is valid ({} suggestions)",
                params.id,
                report.suggestions.len()
            );
        } else {
            warn!("Plan {} failed validation: {}", params.id, report.issues.join("; "));
        }
        Ok(report)
    }

    /// The plan's tasks in dependency order, without changing the plan.
    pub async fn schedule_plan(&self, params: &Id) -> Result<Vec<Task>> {
        let state = self.plan_state(&params.id).await?;
        let state = state.lock().await;
        graph::schedule(state.store.as_slice().to_vec(), &state.graph)
    }

    /// Reorders the plan topologically, then consolidates it.
    ///
    /// A dependency cycle aborts the operation before anything changes.
    pub async fn optimize_plan(&self, params: &Id) -> Result<Plan> {
        let state = self.plan_state(&params.id).await?;
        let mut state = state.lock().await;
        state.ensure_mutable()?;

        let before = state.store.len();
        let ordered = graph::schedule(state.store.as_slice().to_vec(), &state.graph)?;
        let outcome = self.consolidator.consolidate(ordered);

        state.store.replace_all(outcome.tasks);
        state.rebuild_graph();
        state.refresh(Timestamp::now());

        info!(
            "Optimized plan {}: {} tasks -> {} tasks ({} merges)",
            params.id,
            before,
            state.store.len(),
            outcome.merged.len()
        );
        Ok(state.snapshot())
    }

    /// Aggregate metrics over every registered plan.
    pub async fn get_metrics(&self) -> PlanMetrics {
        let mut metrics = PlanMetrics::default();
        let mut total_tasks = 0usize;
        let mut completion_times = Vec::new();

        for state in self.all_states().await {
            let state = state.lock().await;
            metrics.total_plans += 1;
            total_tasks += state.store.len();
            match state.plan.status {
                PlanStatus::Active => metrics.active_plans += 1,
                PlanStatus::Completed => {
                    metrics.completed_plans += 1;
                    completion_times.extend(state.plan.completion_time_ms());
                }
                PlanStatus::Draft | PlanStatus::Cancelled => {}
            }
        }

        if metrics.total_plans > 0 {
            let plans = metrics.total_plans as f64;
            metrics.average_tasks_per_plan = total_tasks as f64 / plans;
            metrics.success_rate = metrics.completed_plans as f64 / plans * 100.0;
        }
        if !completion_times.is_empty() {
            let sum: u64 = completion_times.iter().sum();
            metrics.average_completion_time_ms = sum as f64 / completion_times.len() as f64;
        }
        metrics
    }
}
