//! Heuristic annotation and rewriting stages.
//!
//! None of these stages fail: they only fill in, tag or merge tasks.

pub mod consolidate;
pub mod estimate;
pub mod risk;

pub use consolidate::{
    ConsolidationOutcome, FirstWordGrouping, GroupingStrategy, MergedGroup, TaskConsolidator,
};
pub use estimate::DurationEstimator;
pub use risk::RiskAssessor;
