//! Ordered task storage for a single plan.
//!
//! Tasks live in a dense vector in plan order, with an id → position index
//! kept in sync on every structural change.

use std::collections::HashMap;

use crate::models::Task;

/// Ordered collection of the tasks of one plan.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    next_sequence: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from tasks in order, assigning creation sequence numbers
    /// by position.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::new();
        store.replace_all(tasks);
        for (position, task) in store.tasks.iter_mut().enumerate() {
            task.sequence = position as u64;
        }
        store.next_sequence = store.tasks.len() as u64;
        store
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&position| &self.tasks[position])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        match self.index.get(id) {
            Some(&position) => self.tasks.get_mut(position),
            None => None,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Task ids in plan order.
    pub fn ids(&self) -> Vec<String> {
        self.tasks.iter().map(|task| task.id.clone()).collect()
    }

    /// Append a task, stamping it with the next creation sequence number.
    ///
    /// Returns `false` and leaves the store untouched when the id is taken.
    pub fn push(&mut self, mut task: Task) -> bool {
        if self.index.contains_key(&task.id) {
            return false;
        }
        task.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        true
    }

    /// Remove a task by id, shifting later tasks down.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let position = self.index.remove(id)?;
        let task = self.tasks.remove(position);
        self.reindex();
        Some(task)
    }

    /// Replace the whole task list, keeping the tasks' own sequence numbers.
    ///
    /// Used after reordering and consolidation, which produce the complete
    /// new list at once.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.reindex();
        let highest = self.tasks.iter().map(|task| task.sequence + 1).max();
        self.next_sequence = self.next_sequence.max(highest.unwrap_or(0));
    }

    /// Take all tasks out, leaving the store empty but keeping the sequence
    /// counter.
    pub fn take_all(&mut self) -> Vec<Task> {
        self.index.clear();
        std::mem::take(&mut self.tasks)
    }

    fn reindex(&mut self) {
        self.index = self
            .tasks
            .iter()
            .enumerate()
            .map(|(position, task)| (task.id.clone(), position))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str) -> Task {
        Task::new("plan_1", title)
    }

    #[test]
    fn test_push_assigns_increasing_sequence() {
        let mut store = TaskStore::new();
        assert!(store.push(task("a")));
        assert!(store.push(task("b")));
        let tasks = store.as_slice();
        assert!(tasks[0].created_before(&tasks[1]));
        assert!(!tasks[1].created_before(&tasks[0]));
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut store = TaskStore::new();
        let first = task("a");
        let mut duplicate = task("b");
        duplicate.id = first.id.clone();
        assert!(store.push(first));
        assert!(!store.push(duplicate));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_keeps_index_consistent() {
        let mut store = TaskStore::from_tasks(vec![task("a"), task("b"), task("c")]);
        let ids = store.ids();

        let removed = store.remove(&ids[0]).unwrap();
        assert_eq!(removed.title, "a");
        assert_eq!(store.position(&ids[1]), Some(0));
        assert_eq!(store.get(&ids[2]).unwrap().title, "c");
        assert!(store.remove(&ids[0]).is_none());
    }

    #[test]
    fn test_sequence_survives_replace_all() {
        let mut store = TaskStore::from_tasks(vec![task("a"), task("b")]);
        let mut tasks = store.take_all();
        tasks.reverse();
        store.replace_all(tasks);
        assert!(store.push(task("c")));

        let c = store.as_slice().last().unwrap();
        assert_eq!(c.sequence, 2);
        assert_eq!(store.as_slice()[0].title, "b");
        assert_eq!(store.as_slice()[0].sequence, 1);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut store = TaskStore::from_tasks(vec![task("a")]);
        let id = store.ids().remove(0);
        store.get_mut(&id).unwrap().title = "renamed".to_string();
        assert_eq!(store.get(&id).unwrap().title, "renamed");
        assert!(store.get_mut("missing").is_none());
    }
}
