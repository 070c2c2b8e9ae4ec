//! Dependency entry for a single task.

use serde::{Deserialize, Serialize};

/// Edges touching one task, as derived by the dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDependency {
    pub task_id: String,

    /// Tasks that must complete before this one
    pub depends_on: Vec<String>,

    /// Tasks that depend on this one (inverse of `depends_on`)
    pub dependents: Vec<String>,

    /// Explicit prerequisites, a subset of `depends_on`
    pub prerequisites: Vec<String>,
}

impl TaskDependency {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            depends_on: Vec::new(),
            dependents: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    /// Whether the task has no edges in either direction.
    pub fn is_isolated(&self) -> bool {
        self.depends_on.is_empty() && self.dependents.is_empty()
    }
}
