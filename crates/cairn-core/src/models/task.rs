//! Task model definition and status transitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ids, Priority, RiskLevel, TaskStatus};

/// An atomic unit of work within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier, also unique across the registry
    pub id: String,

    /// ID of the owning plan
    pub plan_id: String,

    /// Short title of the task
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: TaskStatus,

    /// File paths the task is expected to touch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Explicit dependency ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,

    /// Estimated duration in milliseconds
    pub estimated_duration_ms: Option<u64>,

    /// Time between first entering in-progress and completion (ms)
    pub actual_duration_ms: Option<u64>,

    /// Heuristic risk tag
    pub risk: Option<RiskLevel>,

    /// Append-only notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    /// Creation order within the plan, assigned by the task store
    #[serde(default)]
    pub sequence: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// First time the task entered in-progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl Task {
    /// A pending, medium priority task with a fresh id.
    pub fn new(plan_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: ids::task_id(),
            plan_id: plan_id.into(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            files: Vec::new(),
            prerequisites: Vec::new(),
            estimated_duration_ms: None,
            actual_duration_ms: None,
            risk: None,
            notes: Vec::new(),
            sequence: 0,
            created_at: now,
            updated_at: now,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_estimate_ms(mut self, estimate_ms: u64) -> Self {
        self.estimated_duration_ms = Some(estimate_ms);
        self
    }

    /// Whether this task was created strictly before `other`.
    pub fn created_before(&self, other: &Task) -> bool {
        self.sequence < other.sequence
    }

    /// Whether any file path is shared with `other`.
    pub fn shares_files_with(&self, other: &Task) -> bool {
        self.files.iter().any(|file| other.files.contains(file))
    }

    /// Move the task to `status` at time `now`.
    ///
    /// `started_at` is recorded on the first entry into in-progress. The first
    /// entry into completed records `completed_at` and, when the task was
    /// started, the actual duration. Neither is overwritten afterwards.
    pub fn apply_status(&mut self, status: TaskStatus, now: Timestamp) {
        if status == TaskStatus::InProgress && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
            self.actual_duration_ms = self.started_at.map(|started| {
                let elapsed = now.as_millisecond() - started.as_millisecond();
                elapsed.max(0) as u64
            });
        }
        self.status = status;
        self.updated_at = now;
    }

    /// Append a note.
    pub fn add_note(&mut self, note: impl Into<String>, now: Timestamp) {
        self.notes.push(note.into());
        self.updated_at = now;
    }
}
