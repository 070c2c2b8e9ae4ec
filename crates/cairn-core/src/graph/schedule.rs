//! Topological ordering of a plan's tasks.

use super::DependencyGraph;
use crate::{
    error::{PlannerError, Result},
    models::Task,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Placed,
}

/// Positions of the graph's nodes in an order where every task comes after
/// all tasks it depends on.
///
/// Depth-first: each task is placed once all its dependencies are placed.
/// Roots are taken in input order and dependencies in position order, so
/// tasks without edges keep their input order. Hitting a task that is still
/// on the DFS stack aborts with [`PlannerError::CircularDependency`] naming
/// that task and the task whose edge closed the cycle.
pub fn topological_order(graph: &DependencyGraph) -> Result<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut order = Vec::with_capacity(graph.len());

    for root in 0..graph.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack;

        while let Some(&(node, next)) = stack.last() {
            let Some(&dependency) = graph.dependencies_of(node).get(next) else {
                marks[node] = Mark::Placed;
                order.push(node);
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
                    return Err(PlannerError::CircularDependency {
                        task_id: graph.id_at(dependency).to_string(),
                        via: graph.id_at(node).to_string(),
                    });
                }
                Mark::Placed => {}
            }
        }
    }

    Ok(order)
}

/// Reorder `tasks` topologically. `graph` must have been built from `tasks`
/// in their current order.
///
/// The result is the same set of tasks with no attribute changed.
pub fn schedule(tasks: Vec<Task>, graph: &DependencyGraph) -> Result<Vec<Task>> {
    if graph.len() != tasks.len() {
        return Err(PlannerError::invalid_input("graph").with_reason(format!(
            "graph has {} nodes but {} tasks were given",
            graph.len(),
            tasks.len()
        )));
    }

    let order = topological_order(graph)?;
    let mut slots: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect())
}
