//! In-memory registry of plans and the operations on them.
//!
//! [`PlanRegistry`] owns every plan together with its tasks and dependency
//! graph. It is the only entry point front-ends use; the algorithms in
//! [`crate::graph`] and [`crate::heuristics`] are called from here.
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────┐
//! │   plan_ops/task_ops  │   │   generation_ops     │   │  graph/heuristics│
//! │ (lookups, mutations) │──▶│ (collaborator calls) │──▶│  (pure, sync)    │
//! └──────────────────────┘   └──────────────────────┘   └──────────────────┘
//! ```
//!
//! # Locking
//!
//! The plan map sits behind an async read/write lock that is only held for
//! lookups, inserts and removals. Each plan's state sits behind its own async
//! mutex, so one plan has a single writer at a time while different plans
//! proceed independently. The map lock is never held while waiting on a plan
//! lock, and no plan lock is held across a collaborator call.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cairn_core::{
//!     generation::StaticGenerator,
//!     params::{CreatePlan, GenerateTasks, Id},
//!     PlanRegistryBuilder,
//! };
//!
//! # async fn example() -> cairn_core::Result<()> {
//! let registry = PlanRegistryBuilder::new()
//!     .with_task_generator(Arc::new(StaticGenerator::new(
//!         "TASK: Design schema\nFILES: schema.sql\n---\nTASK: Write queries\nFILES: schema.sql",
//!     )))
//!     .build()?;
//!
//! let plan = registry.create_plan(&CreatePlan::new("Storage layer")).await?;
//! let tasks = registry
//!     .generate_tasks(&GenerateTasks {
//!         plan_id: plan.id.clone(),
//!         requirements: "Persist orders".to_string(),
//!         ..GenerateTasks::default()
//!     })
//!     .await?;
//! assert_eq!(tasks.len(), 2);
//!
//! let report = registry.validate_plan(&Id { id: plan.id }).await?;
//! assert!(report.is_valid);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use log::debug;
use tokio::sync::{Mutex, RwLock};

pub mod builder;
pub mod generation_ops;
pub mod plan_ops;
pub mod task_ops;


pub use builder::PlanRegistryBuilder;

use crate::{
    config::EngineConfig,
    error::{PlannerError, Result},
    generation::{CodeGenerator, TaskGenerator},
    graph::DependencyGraph,
    heuristics::{DurationEstimator, RiskAssessor, TaskConsolidator},
    models::{Plan, PlanStatus, Task},
    store::TaskStore,
    validator::PlanValidator,
};

/// Owner of all plans, their tasks and dependency graphs.
pub struct PlanRegistry {
    pub(crate) plans: RwLock<HashMap<String, Arc<Mutex<PlanState>>>>,
    pub(crate) config: EngineConfig,
    pub(crate) task_generator: Option<Arc<dyn TaskGenerator>>,
    pub(crate) code_generator: Option<Arc<dyn CodeGenerator>>,
    pub(crate) estimator: DurationEstimator,
    pub(crate) risk: RiskAssessor,
    pub(crate) consolidator: TaskConsolidator,
    pub(crate) validator: PlanValidator,
}

impl PlanRegistry {
    /// Registry with default thresholds and no collaborators.
    pub fn new() -> Self {
        Self::from_parts(EngineConfig::default(), None, None, TaskConsolidator::default())
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        task_generator: Option<Arc<dyn TaskGenerator>>,
        code_generator: Option<Arc<dyn CodeGenerator>>,
        consolidator: TaskConsolidator,
    ) -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            estimator: DurationEstimator::new(&config),
            risk: RiskAssessor::new(&config),
            validator: PlanValidator::new(&config),
            consolidator,
            config,
            task_generator,
            code_generator,
        }
    }

    /// Thresholds this registry was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of registered plans.
    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }

    /// Shared handle to a plan's state. The map lock is released before the
    /// handle is returned.
    pub(crate) async fn plan_state(&self, plan_id: &str) -> Result<Arc<Mutex<PlanState>>> {
        self.plans
            .read()
            .await
            .get(plan_id)
            .cloned()
            .ok_or_else(|| PlannerError::plan_not_found(plan_id))
    }

    /// Whether `state` is still the registered state for `plan_id`.
    pub(crate) async fn is_registered(&self, plan_id: &str, state: &Arc<Mutex<PlanState>>) -> bool {
        self.plans
            .read()
            .await
            .get(plan_id)
            .is_some_and(|current| Arc::ptr_eq(current, state))
    }

    /// Handles to every plan, taken under a single map read.
    pub(crate) async fn all_states(&self) -> Vec<Arc<Mutex<PlanState>>> {
        self.plans.read().await.values().cloned().collect()
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A plan together with its tasks and derived dependency graph.
#[derive(Debug)]
pub(crate) struct PlanState {
    pub(crate) plan: Plan,
    pub(crate) store: TaskStore,
    pub(crate) graph: DependencyGraph,
}

impl PlanState {
    pub(crate) fn new(plan: Plan) -> Self {
        Self {
            plan,
            store: TaskStore::new(),
            graph: DependencyGraph::default(),
        }
    }

    /// Re-derive the dependency graph from the current task list.
    pub(crate) fn rebuild_graph(&mut self) {
        self.graph = DependencyGraph::build(self.store.as_slice());
        debug!(
            "Rebuilt dependency graph for plan {}: {} tasks, {} edges",
            self.plan.id,
            self.graph.len(),
            self.graph.edge_count()
        );
    }

    /// Recompute progress and lifecycle status.
    pub(crate) fn refresh(&mut self, now: Timestamp) {
        self.plan.refresh(self.store.as_slice(), now);
    }

    /// Plan with its task list filled in.
    pub(crate) fn snapshot(&self) -> Plan {
        let mut plan = self.plan.clone();
        plan.tasks = self.store.as_slice().to_vec();
        plan
    }

    pub(crate) fn task(&self, task_id: &str) -> Result<&Task> {
        self.store
            .get(task_id)
            .ok_or_else(|| PlannerError::task_not_found(&self.plan.id, task_id))
    }

    /// Reject changes to a cancelled plan.
    pub(crate) fn ensure_mutable(&self) -> Result<()> {
        if self.plan.status == PlanStatus::Cancelled {
            return Err(PlannerError::invalid_input("plan_id").with_reason(format!(
                "plan {} is cancelled and can no longer be changed",
                self.plan.id
            )));
        }
        Ok(())
    }
}
