//! Dependency graph algorithms.
//!
//! - [`DependencyGraph`] derives "depends on" edges from shared files and
//!   explicit prerequisites.
//! - [`detect_cycles`] reports every task caught in a cycle without failing.
//! - [`topological_order`] and [`schedule`] produce a dependency-respecting
//!   order and fail fast on the first cycle.
//!
//! All functions are synchronous and side-effect free.

pub mod cycle;
pub mod dependency;
pub mod schedule;

pub use cycle::{detect_cycles, is_acyclic};
pub use dependency::DependencyGraph;
pub use schedule::{schedule, topological_order};
