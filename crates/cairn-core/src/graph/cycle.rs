//! Cycle detection over a dependency graph.

use super::DependencyGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Ids of every task implicated in a dependency cycle, in first-seen order.
///
/// Runs a three-color depth-first search over "depends on" edges. Each back
/// edge `u -> v` contributes the stack segment from `v` to `u`, and the search
/// continues after a hit so every cycle reachable from any root is reported.
/// An empty result means the graph is acyclic.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<String> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut reported = vec![false; graph.len()];
    let mut implicated = Vec::new();

    for root in 0..graph.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // (node, index of the next dependency to visit)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack;

        while let Some(&(node, next)) = stack.last() {
            let Some(&dependency) = graph.dependencies_of(node).get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };

            let top = stack.len() - 1;
            stack[top].1 += 1;

            match marks[dependency] {
                Mark::Unvisited => {
                    marks[dependency] = Mark::OnStack;
                    stack.push((dependency, 0));
                }
                Mark::OnStack => {
                    let start = stack
                        .iter()
                        .position(|&(member, _)| member == dependency)
                        .unwrap_or(top);
                    for &(member, _) in &stack[start..] {
                        if !reported[member] {
                            reported[member] = true;
                            implicated.push(member);
                        }
                    }
                }
                Mark::Done => {}
            }
        }
    }

    implicated
        .into_iter()
        .map(|position| graph.id_at(position).to_string())
        .collect()
}

/// Whether the graph has no dependency cycle.
pub fn is_acyclic(graph: &DependencyGraph) -> bool {
    detect_cycles(graph).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Task, store::TaskStore};

    fn plan(count: usize) -> Vec<Task> {
        let tasks = (0..count)
            .map(|n| Task::new("plan_1", format!("Task {n}")))
            .collect();
        TaskStore::from_tasks(tasks).as_slice().to_vec()
    }

    fn link(tasks: &mut [Task], from: usize, to: usize) {
        let id = tasks[to].id.clone();
        tasks[from].prerequisites.push(id);
    }

    #[test]
    fn test_two_node_cycle_reports_both() {
        let mut tasks = plan(2);
        link(&mut tasks, 0, 1);
        link(&mut tasks, 1, 0);

        let found = detect_cycles(&DependencyGraph::build(&tasks));
        assert_eq!(found.len(), 2);
        assert!(found.contains(&tasks[0].id));
        assert!(found.contains(&tasks[1].id));
    }

    #[test]
    fn test_cycle_through_shared_file_reports_both() {
        let mut tasks = plan(2);
        tasks[0].files = vec!["x.ts".to_string()];
        tasks[1].files = vec!["x.ts".to_string()];
        link(&mut tasks, 0, 1);

        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.edge_count(), 2);

        let found = detect_cycles(&graph);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&tasks[0].id));
        assert!(found.contains(&tasks[1].id));
        assert!(!is_acyclic(&graph));
    }

    #[test]
    fn test_acyclic_graph_reports_nothing() {
        let mut tasks = plan(4);
        link(&mut tasks, 1, 0);
        link(&mut tasks, 2, 0);
        link(&mut tasks, 3, 1);
        link(&mut tasks, 3, 2);

        let graph = DependencyGraph::build(&tasks);
        assert!(detect_cycles(&graph).is_empty());
        assert!(is_acyclic(&graph));
    }

    #[test]
    fn test_separate_cycles_are_all_reported() {
        let mut tasks = plan(5);
        link(&mut tasks, 0, 1);
        link(&mut tasks, 1, 0);
        link(&mut tasks, 2, 3);
        link(&mut tasks, 3, 4);
        link(&mut tasks, 4, 2);

        let found = detect_cycles(&DependencyGraph::build(&tasks));
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_tail_outside_cycle_is_not_implicated() {
        let mut tasks = plan(3);
        // 0 -> 1 -> 2 -> 1
        link(&mut tasks, 0, 1);
        link(&mut tasks, 1, 2);
        link(&mut tasks, 2, 1);

        let found = detect_cycles(&DependencyGraph::build(&tasks));
        assert_eq!(found, vec![tasks[1].id.clone(), tasks[2].id.clone()]);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let mut tasks = plan(3);
        link(&mut tasks, 0, 2);
        link(&mut tasks, 2, 0);
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(detect_cycles(&graph), detect_cycles(&graph));
    }
}
