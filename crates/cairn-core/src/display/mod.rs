//! Markdown formatting for models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes are wrapped in newtypes so the same
//! data can be formatted differently by context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers and    │    │   Markdown      │
//! │  (Plan, Task)   │───▶│ Result Types    │───▶│  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use cairn_core::display::{HumanDuration, OperationStatus};
//!
//! let status = OperationStatus::success(format!("Estimated at {}", HumanDuration(5_400_000)));
//! assert_eq!(status.to_string(), "Success: Estimated at 1h 30m\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{PlanSummaries, Tasks};
pub use datetime::{HumanDuration, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
