//! Collaborator interfaces for text and code generation, and the conversion
//! of generated text into tasks.

pub mod parser;
pub mod prompt;

use async_trait::async_trait;
use log::debug;

pub use parser::{parse_duration_ms, parse_task_blocks, TaskBlock};
pub use prompt::build_task_prompt;

use crate::{
    error::BoxError,
    models::{PlanContext, Task},
};

/// Produces block-format task text from a prompt.
#[async_trait]
pub trait TaskGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, context: &PlanContext) -> Result<String, BoxError>;
}

/// Produces code for a single task.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate_code(
        &self,
        task: &Task,
        context: &PlanContext,
    ) -> Result<String, BoxError>;
}

/// Generator that always answers with the same text.
///
/// Used for replaying a saved response and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticGenerator {
    response: String,
}

impl StaticGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl TaskGenerator for StaticGenerator {
    async fn generate(&self, _prompt: &str, _context: &PlanContext) -> Result<String, BoxError> {
        Ok(self.response.clone())
    }
}

#[async_trait]
impl CodeGenerator for StaticGenerator {
    async fn generate_code(
        &self,
        _task: &Task,
        _context: &PlanContext,
    ) -> Result<String, BoxError> {
        Ok(self.response.clone())
    }
}

/// Turn parsed blocks into tasks of `plan_id`.
///
/// Block dependencies are resolved to explicit prerequisites, first against
/// titles in the same batch, then against ids and titles of `existing`
/// tasks. Title matches are case-insensitive. Unresolved names are dropped.
pub fn tasks_from_blocks(plan_id: &str, blocks: &[TaskBlock], existing: &[Task]) -> Vec<Task> {
    let mut tasks: Vec<Task> = blocks
        .iter()
        .map(|block| {
            let mut task = Task::new(plan_id, block.title.clone())
                .with_description(block.description.clone())
                .with_priority(block.priority)
                .with_files(block.files.iter().cloned());
            task.estimated_duration_ms = block.estimated_duration_ms;
            task
        })
        .collect();

    let resolved: Vec<Vec<String>> = blocks
        .iter()
        .enumerate()
        .map(|(position, block)| {
            let own_id = &tasks[position].id;
            let mut prerequisites: Vec<String> = Vec::new();
            for name in &block.dependencies {
                match resolve(name, &tasks, existing) {
                    Some(id) if id != own_id && !prerequisites.contains(id) => {
                        prerequisites.push(id.clone());
                    }
                    Some(_) => {}
                    None => debug!("Unresolved dependency '{}' on '{}'", name, block.title),
                }
            }
            prerequisites
        })
        .collect();

    for (task, prerequisites) in tasks.iter_mut().zip(resolved) {
        task.prerequisites = prerequisites;
    }
    tasks
}

fn resolve<'a>(name: &str, batch: &'a [Task], existing: &'a [Task]) -> Option<&'a String> {
    let by_title =
        |tasks: &'a [Task]| tasks.iter().find(|t| t.title.eq_ignore_ascii_case(name.trim()));

    by_title(batch)
        .or_else(|| existing.iter().find(|t| t.id == name))
        .or_else(|| by_title(existing))
        .map(|task| &task.id)
}
