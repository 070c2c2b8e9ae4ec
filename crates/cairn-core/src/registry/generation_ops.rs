//! Operations that call out to the generation collaborators.

use std::collections::HashSet;

use jiff::Timestamp;
use log::{debug, info, warn};

use super::PlanRegistry;
use crate::{
    error::{PlannerError, Result},
    generation::{build_task_prompt, parse_task_blocks, tasks_from_blocks, TaskGenerator},
    models::Task,
    params::{GenerateTasks, TaskRef},
};

impl PlanRegistry {
    /// Generates tasks for a plan from a requirements text.
    ///
    /// The prompt is built and the generator called without holding the plan
    /// lock. The parsed tasks are then integrated in one step: appended,
    /// estimated and risk-tagged as requested, optionally consolidated, after
    /// which the graph is rebuilt and the plan re-validated. A generator
    /// failure leaves the plan untouched.
    ///
    /// Returns the tasks that came out of this run, as stored in the plan.
    pub async fn generate_tasks(&self, params: &GenerateTasks) -> Result<Vec<Task>> {
        let generator =
            self.task_generator
                .clone()
                .ok_or_else(|| PlannerError::Configuration {
                    message: "no task generator configured".to_string(),
                })?;
        self.generate_tasks_with(generator.as_ref(), params).await
    }

    /// Like [`generate_tasks`](Self::generate_tasks), with a generator
    /// supplied by the caller instead of the configured one.
    pub async fn generate_tasks_with(
        &self,
        generator: &dyn TaskGenerator,
        params: &GenerateTasks,
    ) -> Result<Vec<Task>> {
        let handle = self.plan_state(&params.plan_id).await?;
        let context = {
            let state = handle.lock().await;
            state.ensure_mutable()?;
            params.options.context().or(&state.plan.context)
        };

        let prompt = build_task_prompt(&params.requirements, &context, params.options.max_tasks);
        debug!(
            "Requesting tasks for plan {} ({} byte prompt)",
            params.plan_id,
            prompt.len()
        );
        let response = generator
            .generate(&prompt, &context)
            .await
            .map_err(|source| PlannerError::Generation {
                plan_id: params.plan_id.clone(),
                source,
            })?;

        let mut blocks = parse_task_blocks(&response);
        if let Some(max) = params.options.max_tasks {
            blocks.truncate(max);
        }
        if blocks.is_empty() {
            warn!("Generator returned no task blocks for plan {}", params.plan_id);
        }

        let mut state = handle.lock().await;
        // The plan may have been deleted or cancelled while the generator ran
        if !self.is_registered(&params.plan_id, &handle).await {
            return Err(PlannerError::plan_not_found(&params.plan_id));
        }
        state.ensure_mutable()?;

        let mut tasks = tasks_from_blocks(&params.plan_id, &blocks, state.store.as_slice());
        if params.options.estimate {
            self.estimator.apply(&mut tasks);
        }
        if params.options.assess_risk {
            self.risk.apply(&mut tasks);
        }

        let mut produced: HashSet<String> = HashSet::new();
        for task in tasks {
            let id = task.id.clone();
            if state.store.push(task) {
                produced.insert(id);
            }
        }

        if params.options.consolidate {
            let outcome = self.consolidator.consolidate(state.store.take_all());
            for group in &outcome.merged {
                if group.member_ids.iter().any(|id| produced.contains(id)) {
                    produced.insert(group.merged_id.clone());
                }
            }
            state.store.replace_all(outcome.tasks);
        }

        state.rebuild_graph();
        state.refresh(Timestamp::now());

        let report = self.validator.validate(state.store.as_slice(), &state.graph);
        if !report.is_valid {
            warn!(
                "Plan {} is invalid after generation: {}",
                params.plan_id,
                report.issues.join("; ")
            );
        }

        let generated: Vec<Task> = state
            .store
            .iter()
            .filter(|task| produced.contains(&task.id))
            .cloned()
            .collect();
        info!(
            "Generated {} tasks for plan {}",
            generated.len(),
            params.plan_id
        );
        Ok(generated)
    }

    /// Asks the code generator for code implementing a task.
    ///
    /// On success a note is appended to the task; on failure the plan is left
    /// untouched and the collaborator error is returned wrapped.
    pub async fn generate_code(&self, params: &TaskRef) -> Result<String> {
        let generator =
            self.code_generator
                .clone()
                .ok_or_else(|| PlannerError::Configuration {
                    message: "no code generator configured".to_string(),
                })?;

        let handle = self.plan_state(&params.plan_id).await?;
        let (task, context) = {
            let state = handle.lock().await;
            (state.task(&params.task_id)?.clone(), state.plan.context.clone())
        };

        let code = generator
            .generate_code(&task, &context)
            .await
            .map_err(|source| PlannerError::CodeGeneration {
                task_id: params.task_id.clone(),
                source,
            })?;

        let mut state = handle.lock().await;
        let now = Timestamp::now();
        if let Some(task) = state.store.get_mut(&params.task_id) {
            task.add_note(
                format!("Generated code ({} lines)", code.lines().count()),
                now,
            );
        }
        info!("Generated code for task {}", params.task_id);
        Ok(code)
    }
}
