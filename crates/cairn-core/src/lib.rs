//! Core library for the Cairn planning engine.
//!
//! Cairn turns a free-form requirements text into a plan of tasks, derives a
//! dependency graph from explicit prerequisites and shared files, orders the
//! tasks topologically, merges closely related short tasks, attaches duration
//! and risk estimates, and validates the result. Plans live in memory in a
//! [`PlanRegistry`], which is safe to share between concurrent callers.
//!
//! # Layout
//!
//! - [`models`]: plans, tasks and their statuses
//! - [`store`]: ordered, id-indexed task storage for one plan
//! - [`graph`]: dependency graph, cycle detection and scheduling
//! - [`heuristics`]: duration estimates, risk tags and consolidation
//! - [`validator`]: structural and advisory plan checks
//! - [`generation`]: collaborator traits, prompt building and response parsing
//! - [`registry`]: the concurrent facade tying everything together
//! - [`display`]: markdown formatting for terminal and MCP output
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cairn_core::{
//!     generation::StaticGenerator,
//!     params::{CreatePlan, GenerateOptions, GenerateTasks, Id},
//!     PlanRegistryBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let response = "TASK: Create schema\nPRIORITY: high\n---\nTASK: Write queries\nDEPENDENCIES: Create schema\n";
//! let registry = PlanRegistryBuilder::new()
//!     .with_task_generator(Arc::new(StaticGenerator::new(response)))
//!     .build()?;
//!
//! let plan = registry.create_plan(&CreatePlan::new("Storage layer")).await?;
//! let tasks = registry
//!     .generate_tasks(&GenerateTasks {
//!         plan_id: plan.id.clone(),
//!         requirements: "Persist orders in SQL".to_string(),
//!         options: GenerateOptions::default(),
//!     })
//!     .await?;
//! assert_eq!(tasks.len(), 2);
//!
//! let ordered = registry.schedule_plan(&Id { id: plan.id.clone() }).await?;
//! println!("{}", cairn_core::display::Tasks(ordered));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod generation;
pub mod graph;
pub mod heuristics;
pub mod models;
pub mod params;
pub mod registry;
pub mod store;
pub mod validator;

pub use config::EngineConfig;
pub use display::{
    CreateResult, DeleteResult, HumanDuration, OperationStatus, PlanSummaries, Tasks,
    UpdateResult,
};
pub use error::{ErrorKind, PlannerError, Result};
pub use generation::{CodeGenerator, TaskGenerator};
pub use models::{
    Plan, PlanContext, PlanMetrics, PlanStatus, PlanSummary, Priority, RiskLevel, Task,
    TaskDependency, TaskStatus, ValidationReport,
};
pub use registry::{PlanRegistry, PlanRegistryBuilder};
