//! Risk tagging.

use crate::{
    config::EngineConfig,
    models::{RiskLevel, Task},
};

/// Tags tasks `low`, `medium` or `high` from file count and description
/// keywords.
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    file_threshold: usize,
    keywords: Vec<String>,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl RiskAssessor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            file_threshold: config.risk_file_threshold,
            keywords: config
                .risk_keywords
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .collect(),
        }
    }

    /// Risk level for `task`. Keywords are checked last and only ever raise
    /// the level.
    pub fn assess(&self, task: &Task) -> RiskLevel {
        let mut risk = RiskLevel::Low;
        if task.files.len() > self.file_threshold {
            risk = RiskLevel::Medium;
        }

        let description = task.description.to_lowercase();
        if self
            .keywords
            .iter()
            .any(|keyword| description.contains(keyword.as_str()))
        {
            risk = risk.max(RiskLevel::High);
        }
        risk
    }

    /// Overwrite the risk tag of every task.
    pub fn apply(&self, tasks: &mut [Task]) {
        for task in tasks.iter_mut() {
            task.risk = Some(self.assess(task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str, files: usize) -> Task {
        Task::new("plan_1", "Task")
            .with_description(description)
            .with_files((0..files).map(|n| format!("src/mod{n}.rs")))
    }

    #[test]
    fn test_levels() {
        let assessor = RiskAssessor::default();
        assert_eq!(assessor.assess(&task("Add a button", 2)), RiskLevel::Low);
        assert_eq!(assessor.assess(&task("Add a button", 5)), RiskLevel::Low);
        assert_eq!(assessor.assess(&task("Add a button", 6)), RiskLevel::Medium);
        assert_eq!(assessor.assess(&task("Database MIGRATION", 0)), RiskLevel::High);
    }

    #[test]
    fn test_refactor_across_many_files_is_high() {
        let assessor = RiskAssessor::default();
        let task = task("Refactor the auth module across 7 files", 7);
        assert_eq!(assessor.assess(&task), RiskLevel::High);
    }

    #[test]
    fn test_apply_overwrites_and_is_deterministic() {
        let assessor = RiskAssessor::default();
        let mut tasks = vec![task("plain", 0), task("integration tests", 1)];
        tasks[0].risk = Some(RiskLevel::High);

        assessor.apply(&mut tasks);
        let first = tasks.clone();
        assessor.apply(&mut tasks);

        assert_eq!(tasks, first);
        assert_eq!(tasks[0].risk, Some(RiskLevel::Low));
        assert_eq!(tasks[1].risk, Some(RiskLevel::High));
    }
}
