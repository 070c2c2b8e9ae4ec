//! Error types for the planning engine.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by external collaborators (text and code generators).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found in plan {plan_id}")]
    TaskNotFound { plan_id: String, id: String },
    /// A dependency cycle was hit while ordering tasks
    #[error("Circular dependency detected at task {task_id} (reached from {via})")]
    CircularDependency { task_id: String, via: String },
    /// The text-generation collaborator failed
    #[error("Task generation failed for plan {plan_id}: {source}")]
    Generation {
        plan_id: String,
        #[source]
        source: BoxError,
    },
    /// The code-generation collaborator failed
    #[error("Code generation failed for task {task_id}: {source}")]
    CodeGeneration {
        task_id: String,
        #[source]
        source: BoxError,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of [`PlannerError`] for callers that branch on the
/// kind of failure rather than on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Cycle,
    Collaborator,
    InvalidInput,
    Configuration,
    Io,
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Shorthand for [`PlannerError::PlanNotFound`].
    pub fn plan_not_found(id: impl Into<String>) -> Self {
        Self::PlanNotFound { id: id.into() }
    }

    /// Shorthand for [`PlannerError::TaskNotFound`].
    pub fn task_not_found(plan_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self::TaskNotFound {
            plan_id: plan_id.into(),
            id: id.into(),
        }
    }

    /// The kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlanNotFound { .. } | Self::TaskNotFound { .. } => ErrorKind::NotFound,
            Self::CircularDependency { .. } => ErrorKind::Cycle,
            Self::Generation { .. } | Self::CodeGeneration { .. } => ErrorKind::Collaborator,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Configuration { .. } | Self::Serialization { .. } => ErrorKind::Configuration,
            Self::FileSystem { .. } => ErrorKind::Io,
        }
    }

    /// Whether the error reports a missing plan or task.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, PlannerError>;
