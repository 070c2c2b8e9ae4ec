//! Merging of small, homogeneous tasks.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use log::debug;

use crate::{
    config::EngineConfig,
    graph::{self, DependencyGraph},
    models::{ids, Task, TaskStatus},
};

/// Decides which tasks are candidates for merging with each other.
///
/// Only tasks with the same key can be merged; `None` keeps a task out of
/// every group.
pub trait GroupingStrategy: fmt::Debug + Send + Sync {
    fn group_key(&self, task: &Task) -> Option<String>;
}

/// Groups tasks by the lower-cased first word of their title.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstWordGrouping;

impl GroupingStrategy for FirstWordGrouping {
    fn group_key(&self, task: &Task) -> Option<String> {
        task.title
            .split_whitespace()
            .next()
            .map(|word| word.to_lowercase())
    }
}

/// One merge performed by the consolidator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedGroup {
    pub merged_id: String,
    pub member_ids: Vec<String>,
}

/// Result of a consolidation pass.
#[derive(Debug, Clone)]
pub struct ConsolidationOutcome {
    /// Tasks after merging, in plan order
    pub tasks: Vec<Task>,
    /// Merges that happened, in plan order
    pub merged: Vec<MergedGroup>,
}

/// Merges groups of small tasks that share a priority.
#[derive(Debug, Clone)]
pub struct TaskConsolidator {
    strategy: Arc<dyn GroupingStrategy>,
    max_member_estimate_ms: u64,
}

impl Default for TaskConsolidator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl TaskConsolidator {
    /// Consolidator using [`FirstWordGrouping`].
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_strategy(config, Arc::new(FirstWordGrouping))
    }

    pub fn with_strategy(config: &EngineConfig, strategy: Arc<dyn GroupingStrategy>) -> Self {
        Self {
            strategy,
            max_member_estimate_ms: config.consolidation_max_estimate_ms,
        }
    }

    /// Merge every eligible group in `tasks`.
    ///
    /// A group of two or more tasks is merged when all members have the same
    /// priority and every member's estimate, where set, is below the
    /// configured ceiling. The merged task takes the place of the group's
    /// first member. Prerequisites elsewhere that named a member are pointed
    /// at the merged task.
    ///
    /// A merge that would close a dependency cycle (a member reaching another
    /// member through a task outside the group) is skipped, so an acyclic
    /// input always yields an acyclic output. Cyclic input is returned
    /// unchanged.
    pub fn consolidate(&self, tasks: Vec<Task>) -> ConsolidationOutcome {
        if !graph::is_acyclic(&DependencyGraph::build(&tasks)) {
            debug!("Skipping consolidation of {} tasks with a dependency cycle", tasks.len());
            return ConsolidationOutcome {
                tasks,
                merged: Vec::new(),
            };
        }

        let mut groups: Vec<Vec<String>> = Vec::new();
        let mut group_of_key: HashMap<String, usize> = HashMap::new();
        for task in &tasks {
            if let Some(key) = self.strategy.group_key(task) {
                let group = *group_of_key.entry(key).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[group].push(task.id.clone());
            }
        }

        let mut taken: HashSet<String> = tasks.iter().map(|task| task.id.clone()).collect();
        let now = Timestamp::now();

        let mut current = tasks;
        let mut merged = Vec::new();
        for member_ids in &groups {
            let members: Vec<usize> = member_ids
                .iter()
                .filter_map(|id| current.iter().position(|task| task.id == *id))
                .collect();
            if !self.is_mergeable(&current, &members) {
                continue;
            }

            let (candidate, group) = apply_merge(&current, &members, &taken, now);
            if !graph::is_acyclic(&DependencyGraph::build(&candidate)) {
                debug!(
                    "Not merging {} tasks into '{}': the merge would create a dependency cycle",
                    members.len(),
                    current[members[0]].title
                );
                continue;
            }

            taken.insert(group.merged_id.clone());
            merged.push(group);
            current = candidate;
        }

        if !merged.is_empty() {
            debug!(
                "Consolidated {} groups, {} tasks remain",
                merged.len(),
                current.len()
            );
        }

        ConsolidationOutcome {
            tasks: current,
            merged,
        }
    }

    fn is_mergeable(&self, tasks: &[Task], members: &[usize]) -> bool {
        if members.len() < 2 {
            return false;
        }
        let priority = tasks[members[0]].priority;
        members.iter().all(|&position| {
            let task = &tasks[position];
            task.priority == priority
                && task
                    .estimated_duration_ms
                    .map_or(true, |estimate| estimate < self.max_member_estimate_ms)
        })
    }
}

/// Replace the tasks at `members` with one merged task placed at the first
/// member's position, pointing prerequisites that named a member at it.
fn apply_merge(
    tasks: &[Task],
    members: &[usize],
    taken: &HashSet<String>,
    now: Timestamp,
) -> (Vec<Task>, MergedGroup) {
    let member_tasks: Vec<&Task> = members.iter().map(|&p| &tasks[p]).collect();
    let merged_task = merge_group(&member_tasks, taken, now);
    let group = MergedGroup {
        merged_id: merged_task.id.clone(),
        member_ids: member_tasks.iter().map(|t| t.id.clone()).collect(),
    };

    let mut merged_task = Some(merged_task);
    let mut output: Vec<Task> = Vec::with_capacity(tasks.len() + 1 - members.len());
    for (position, task) in tasks.iter().enumerate() {
        if position == members[0] {
            output.extend(merged_task.take());
        } else if !members.contains(&position) {
            output.push(task.clone());
        }
    }

    for task in &mut output {
        let mut seen = HashSet::new();
        let remapped: Vec<String> = task
            .prerequisites
            .iter()
            .map(|id| {
                if group.member_ids.contains(id) {
                    group.merged_id.clone()
                } else {
                    id.clone()
                }
            })
            .filter(|id| *id != task.id && seen.insert(id.clone()))
            .collect();
        task.prerequisites = remapped;
    }

    (output, group)
}

fn merge_group(members: &[&Task], taken: &HashSet<String>, now: Timestamp) -> Task {
    let first = members[0];
    let member_ids: HashSet<&str> = members.iter().map(|t| t.id.as_str()).collect();

    let mut id = ids::task_id();
    while taken.contains(&id) {
        id = ids::task_id();
    }

    let estimated_duration_ms = members
        .iter()
        .filter_map(|t| t.estimated_duration_ms)
        .reduce(|a, b| a + b);

    let mut files: Vec<String> = Vec::new();
    let mut prerequisites: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();
    for member in members {
        for file in &member.files {
            if !files.contains(file) {
                files.push(file.clone());
            }
        }
        for prerequisite in &member.prerequisites {
            if !member_ids.contains(prerequisite.as_str()) && !prerequisites.contains(prerequisite)
            {
                prerequisites.push(prerequisite.clone());
            }
        }
        notes.extend(member.notes.iter().cloned());
    }
    notes.push(format!(
        "Consolidated from: {}",
        members
            .iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let all_completed = members.iter().all(|t| t.status == TaskStatus::Completed);
    let (status, started_at, completed_at, actual_duration_ms) = if all_completed {
        (
            TaskStatus::Completed,
            members.iter().filter_map(|t| t.started_at).min(),
            members.iter().filter_map(|t| t.completed_at).max(),
            members
                .iter()
                .filter_map(|t| t.actual_duration_ms)
                .reduce(|a, b| a + b),
        )
    } else {
        (TaskStatus::Pending, None, None, None)
    };

    Task {
        id,
        plan_id: first.plan_id.clone(),
        title: format!("{} (consolidated)", first.title),
        description: members
            .iter()
            .map(|t| t.description.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        priority: first.priority,
        status,
        files,
        prerequisites,
        estimated_duration_ms,
        actual_duration_ms,
        risk: members.iter().filter_map(|t| t.risk).max(),
        notes,
        sequence: first.sequence,
        created_at: first.created_at,
        updated_at: now,
        started_at,
        completed_at,
    }
}
