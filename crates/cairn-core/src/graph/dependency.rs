//! Edge derivation between the tasks of one plan.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::models::{Task, TaskDependency};

/// "Depends on" edges of a plan, derived from shared files and explicit
/// prerequisites.
///
/// The graph is a snapshot of the task list it was built from: node `i`
/// corresponds to the task at position `i`. It is never patched in place;
/// callers rebuild it after any change to the task set or order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<TaskDependency>,
    index: HashMap<String, usize>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Derive every edge for `tasks`.
    ///
    /// For each pair where task A was created strictly before task B and the
    /// two share at least one file, B depends on A. Explicit prerequisites are
    /// added on top regardless of files or creation order. Prerequisites that
    /// name unknown tasks, or the task itself, are skipped.
    pub fn build(tasks: &[Task]) -> Self {
        let index: HashMap<String, usize> = tasks
            .iter()
            .enumerate()
            .map(|(position, task)| (task.id.clone(), position))
            .collect();

        let mut depends_on: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tasks.len()];
        let mut explicit: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tasks.len()];

        for (later_pos, later) in tasks.iter().enumerate() {
            if !later.files.is_empty() {
                for (earlier_pos, earlier) in tasks.iter().enumerate() {
                    if earlier_pos != later_pos
                        && earlier.created_before(later)
                        && earlier.shares_files_with(later)
                    {
                        depends_on[later_pos].insert(earlier_pos);
                    }
                }
            }

            for prerequisite in &later.prerequisites {
                match index.get(prerequisite) {
                    Some(&position) if position == later_pos => {
                        debug!("Ignoring self-prerequisite on task {}", later.id);
                    }
                    Some(&position) => {
                        depends_on[later_pos].insert(position);
                        explicit[later_pos].insert(position);
                    }
                    None => {
                        debug!(
                            "Ignoring unknown prerequisite {} on task {}",
                            prerequisite, later.id
                        );
                    }
                }
            }
        }

        let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tasks.len()];
        for (dependent, targets) in depends_on.iter().enumerate() {
            for &target in targets {
                dependents[target].insert(dependent);
            }
        }

        let ids = |positions: &BTreeSet<usize>| -> Vec<String> {
            positions.iter().map(|&p| tasks[p].id.clone()).collect()
        };

        let nodes = tasks
            .iter()
            .enumerate()
            .map(|(position, task)| TaskDependency {
                task_id: task.id.clone(),
                depends_on: ids(&depends_on[position]),
                dependents: ids(&dependents[position]),
                prerequisites: ids(&explicit[position]),
            })
            .collect();

        let edges = depends_on
            .into_iter()
            .map(|targets| targets.into_iter().collect())
            .collect();

        Self {
            nodes,
            index,
            edges,
        }
    }

    /// Number of nodes (tasks).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of "depends on" edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// All dependency entries in task order.
    pub fn nodes(&self) -> &[TaskDependency] {
        &self.nodes
    }

    /// Dependency entry for a task id.
    pub fn get(&self, task_id: &str) -> Option<&TaskDependency> {
        self.index.get(task_id).map(|&position| &self.nodes[position])
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.index.get(task_id).copied()
    }

    /// Task id of the node at `position`.
    pub fn id_at(&self, position: usize) -> &str {
        &self.nodes[position].task_id
    }

    /// Positions the node at `position` depends on, in ascending order.
    pub fn dependencies_of(&self, position: usize) -> &[usize] {
        &self.edges[position]
    }

    /// Whether a task has any edge in either direction.
    pub fn has_edges(&self, task_id: &str) -> bool {
        self.get(task_id).is_some_and(|node| !node.is_isolated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn tasks(specs: &[(&str, &[&str])]) -> Vec<Task> {
        let tasks = specs
            .iter()
            .map(|(title, files)| Task::new("plan_1", *title).with_files(files.iter().copied()))
            .collect();
        TaskStore::from_tasks(tasks).as_slice().to_vec()
    }

    #[test]
    fn test_shared_file_creates_edge_from_later_to_earlier() {
        let tasks = tasks(&[("A", &["x.ts"]), ("B", &["x.ts"])]);
        let graph = DependencyGraph::build(&tasks);

        let b = graph.get(&tasks[1].id).unwrap();
        assert_eq!(b.depends_on, vec![tasks[0].id.clone()]);
        assert!(b.prerequisites.is_empty());

        let a = graph.get(&tasks[0].id).unwrap();
        assert!(a.depends_on.is_empty());
        assert_eq!(a.dependents, vec![tasks[1].id.clone()]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_follows_creation_order_not_position() {
        let mut tasks = tasks(&[("A", &["x.ts"]), ("B", &["x.ts"])]);
        tasks.reverse();
        let graph = DependencyGraph::build(&tasks);

        // B now sits first but was still created after A
        assert_eq!(graph.get(&tasks[0].id).unwrap().depends_on, vec![tasks[1].id.clone()]);
    }

    #[test]
    fn test_no_files_no_edges() {
        let tasks = tasks(&[("A", &[]), ("B", &[]), ("C", &["c.rs"])]);
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.edge_count(), 0);
        assert!(tasks.iter().all(|task| !graph.has_edges(&task.id)));
    }

    #[test]
    fn test_explicit_prerequisites_are_unioned() {
        let mut tasks = tasks(&[("A", &[]), ("B", &[]), ("C", &[])]);
        tasks[0].prerequisites = vec![tasks[2].id.clone(), "task_missing".to_string()];
        tasks[1].prerequisites = vec![tasks[1].id.clone()];
        let graph = DependencyGraph::build(&tasks);

        let a = graph.get(&tasks[0].id).unwrap();
        assert_eq!(a.depends_on, vec![tasks[2].id.clone()]);
        assert_eq!(a.prerequisites, vec![tasks[2].id.clone()]);
        assert!(graph.get(&tasks[1].id).unwrap().is_isolated());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_rebuild_replaces_previous_edges() {
        let mut tasks = tasks(&[("A", &["x.ts"]), ("B", &["x.ts"])]);
        assert_eq!(DependencyGraph::build(&tasks).edge_count(), 1);

        tasks[1].files = vec!["y.ts".to_string()];
        assert_eq!(DependencyGraph::build(&tasks).edge_count(), 0);
    }
}
