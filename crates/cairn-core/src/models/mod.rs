//! Data models for plans, tasks and the reports derived from them.
//!
//! Display implementations for these models live in [`crate::display`], so
//! this module holds data and the small amount of bookkeeping that keeps a
//! record internally consistent (status transitions, progress).
//!
//! # Examples
//!
//! ```rust
//! use cairn_core::models::{Plan, PlanContext, PlanStatus, Task, TaskStatus};
//! use jiff::Timestamp;
//!
//! let mut plan = Plan::new("Checkout", "Ship the new checkout", PlanContext::default());
//! assert_eq!(plan.status, PlanStatus::Draft);
//!
//! let mut task = Task::new(&plan.id, "Add cart endpoint");
//! task.apply_status(TaskStatus::Completed, Timestamp::now());
//!
//! plan.refresh(&[task], Timestamp::now());
//! assert_eq!(plan.status, PlanStatus::Completed);
//! assert_eq!(plan.progress, 100.0);
//! ```

pub mod dependency;
pub mod ids;
pub mod plan;
pub mod report;
pub mod status;
pub mod summary;
pub mod task;


pub use dependency::TaskDependency;
pub use plan::{Plan, PlanContext};
pub use report::{PlanMetrics, ValidationReport};
pub use status::{PlanStatus, Priority, RiskLevel, TaskStatus};
pub use summary::PlanSummary;
pub use task::Task;
