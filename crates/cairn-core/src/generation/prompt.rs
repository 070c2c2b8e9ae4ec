//! Prompt construction for task generation.

use std::fmt::Write;

use crate::models::PlanContext;

const FORMAT_INSTRUCTIONS: &str = "\
Respond with one block per task, separated by a line containing only ---.
Each block uses these keys, one per line:

TASK: <short imperative title>
DESCRIPTION: <what has to be done and how to verify it>
PRIORITY: high | medium | low
DEPENDENCIES: <comma-separated titles of tasks that must finish first, or none>
ESTIMATED_TIME: <duration such as 90m or 2h>
FILES: <comma-separated paths the task will touch>
";

/// Build the prompt sent to the task generator.
pub fn build_task_prompt(
    requirements: &str,
    context: &PlanContext,
    max_tasks: Option<usize>,
) -> String {
    let mut prompt = String::from(
        "Break the following requirements down into discrete, independently \
         verifiable development tasks.\n\n",
    );

    let _ = writeln!(prompt, "## Requirements\n\n{}\n", requirements.trim());

    let details = [
        ("Project type", &context.project_type),
        ("Framework", &context.framework),
        ("Complexity", &context.complexity),
    ];
    if details.iter().any(|(_, value)| value.is_some()) {
        prompt.push_str("## Context\n\n");
        for (label, value) in details {
            if let Some(value) = value {
                let _ = writeln!(prompt, "- {label}: {value}");
            }
        }
        prompt.push('\n');
    }

    if let Some(max) = max_tasks {
        let _ = writeln!(prompt, "Produce at most {max} tasks.\n");
    }

    prompt.push_str("## Format\n\n");
    prompt.push_str(FORMAT_INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_requirements_and_format() {
        let prompt = build_task_prompt("  Build a todo app  ", &PlanContext::default(), None);
        assert!(prompt.contains("## Requirements\n\nBuild a todo app\n"));
        assert!(prompt.contains("ESTIMATED_TIME:"));
        assert!(!prompt.contains("## Context"));
        assert!(!prompt.contains("at most"));
    }

    #[test]
    fn test_prompt_includes_context_and_limit() {
        let context = PlanContext {
            project_type: Some("web".to_string()),
            framework: None,
            complexity: Some("high".to_string()),
        };
        let prompt = build_task_prompt("Build a shop", &context, Some(5));
        assert!(prompt.contains("- Project type: web"));
        assert!(prompt.contains("- Complexity: high"));
        assert!(!prompt.contains("Framework"));
        assert!(prompt.contains("at most 5 tasks"));
    }
}
