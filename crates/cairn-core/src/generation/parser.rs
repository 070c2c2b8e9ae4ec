//! Parser for the block format produced by task generators.
//!
//! Records are separated by a line containing only `---`. Inside a record,
//! `KEY: value` lines set fields:
//!
//! ```text
//! TASK: Setup database
//! DESCRIPTION: Create the schema and the
//! first migration.
//! PRIORITY: high
//! DEPENDENCIES: none
//! ESTIMATED_TIME: 90m
//! FILES: db/schema.sql, db/migrations/001.sql
//! ---
//! TASK: Seed data
//! ```
//!
//! Parsing is lenient: keys are case-insensitive, markdown bullets and bold
//! markers around keys are tolerated, unknown keys are skipped, and lines
//! that follow `DESCRIPTION` without a key continue the description.

use jiff::SignedDuration;

use crate::{config::HOUR_MS, models::Priority};

/// One parsed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBlock {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Titles or ids of tasks this one depends on, unresolved
    pub dependencies: Vec<String>,
    pub estimated_duration_ms: Option<u64>,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Task,
    Description,
    Priority,
    Dependencies,
    EstimatedTime,
    Files,
}

impl Key {
    fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "TASK" | "TITLE" => Some(Key::Task),
            "DESCRIPTION" => Some(Key::Description),
            "PRIORITY" => Some(Key::Priority),
            "DEPENDENCIES" | "DEPENDS_ON" => Some(Key::Dependencies),
            "ESTIMATED_TIME" | "ESTIMATE" => Some(Key::EstimatedTime),
            "FILES" => Some(Key::Files),
            _ => None,
        }
    }
}

/// A `KEY: value` line. `key` is `None` for an unrecognised key.
struct KeyLine<'a> {
    key: Option<Key>,
    value: &'a str,
}

/// Parse every record in `text`. Records without a title or description are
/// dropped; text with no records yields an empty list.
pub fn parse_task_blocks(text: &str) -> Vec<TaskBlock> {
    let mut blocks = Vec::new();
    let mut record: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == "---" {
            blocks.extend(parse_record(&record));
            record.clear();
        } else {
            record.push(line);
        }
    }
    blocks.extend(parse_record(&record));

    blocks
}

fn parse_record(lines: &[&str]) -> Option<TaskBlock> {
    let mut block = TaskBlock::default();
    let mut title: Option<String> = None;
    let mut description: Vec<&str> = Vec::new();
    let mut has_description = false;
    let mut in_description = false;

    for line in lines {
        let Some(key_line) = split_key_line(line) else {
            let text = line.trim();
            if in_description && !text.is_empty() {
                description.push(text);
            }
            continue;
        };

        in_description = false;
        let value = key_line.value;
        match key_line.key {
            Some(Key::Task) => {
                if !value.is_empty() {
                    title = Some(value.to_string());
                }
            }
            Some(Key::Description) => {
                has_description = true;
                in_description = true;
                if !value.is_empty() {
                    description.push(value);
                }
            }
            Some(Key::Priority) => block.priority = value.parse().unwrap_or_default(),
            Some(Key::Dependencies) => {
                block.dependencies = split_list(value)
                    .filter(|item| !item.eq_ignore_ascii_case("none"))
                    .collect();
            }
            Some(Key::EstimatedTime) => block.estimated_duration_ms = parse_duration_ms(value),
            Some(Key::Files) => {
                block.files = split_list(value)
                    .map(|file| file.trim_matches('`').to_string())
                    .filter(|file| !file.is_empty())
                    .collect();
            }
            None => {}
        }
    }

    if title.is_none() && !has_description {
        return None;
    }

    block.description = description.join("\n");
    block.title = match title {
        Some(title) => title,
        None => description.first()?.to_string(),
    };
    Some(block)
}

fn split_key_line(line: &str) -> Option<KeyLine<'_>> {
    let stripped = line.trim().trim_start_matches(['-', '*']).trim_start();
    let (raw_key, value) = stripped.split_once(':')?;

    let raw_key = raw_key.trim().trim_matches('*').trim();
    if raw_key.is_empty()
        || !raw_key
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '_' || c == ' ')
    {
        return None;
    }

    let normalized = raw_key.to_ascii_uppercase().replace(' ', "_");
    let key = Key::parse(&normalized);
    // Unknown keys only count as key lines when written in capitals, so
    // prose like "Note: ..." stays part of a description.
    if key.is_none() && raw_key != raw_key.to_ascii_uppercase() {
        return None;
    }

    let value = value.trim().trim_matches('*').trim();
    Some(KeyLine { key, value })
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

/// Parse an estimate into milliseconds.
///
/// Accepts a bare number of hours (`1.5`) or a friendly duration (`2h`,
/// `90m`, `1h 30m`, `2 hours`). Returns `None` for anything else, including
/// negative durations.
pub fn parse_duration_ms(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(hours) = value.parse::<f64>() {
        if !hours.is_finite() || hours < 0.0 {
            return None;
        }
        return Some((hours * HOUR_MS as f64).round() as u64);
    }

    let duration: SignedDuration = value.to_lowercase().parse().ok()?;
    if duration.is_negative() {
        return None;
    }
    u64::try_from(duration.as_millis()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MINUTE_MS;

    const SAMPLE: &str = "\
TASK: Setup database
DESCRIPTION: Create the schema
and the first migration.
PRIORITY: high
DEPENDENCIES: none
ESTIMATED_TIME: 90m
FILES: db/schema.sql, db/migrations/001.sql
---
TASK: Seed data
DESCRIPTION: Load fixtures
PRIORITY: urgent
DEPENDENCIES: Setup database
FILES: db/seed.sql
OWNER: alice
---
";

    #[test]
    fn test_parse_two_blocks() {
        let blocks = parse_task_blocks(SAMPLE);
        assert_eq!(blocks.len(), 2);

        let first = &blocks[0];
        assert_eq!(first.title, "Setup database");
        assert_eq!(first.description, "Create the schema\nand the first migration.");
        assert_eq!(first.priority, Priority::High);
        assert!(first.dependencies.is_empty());
        assert_eq!(first.estimated_duration_ms, Some(90 * MINUTE_MS));
        assert_eq!(first.files, vec!["db/schema.sql", "db/migrations/001.sql"]);

        let second = &blocks[1];
        assert_eq!(second.priority, Priority::Medium);
        assert_eq!(second.dependencies, vec!["Setup database"]);
        assert_eq!(second.estimated_duration_ms, None);
        assert_eq!(second.description, "Load fixtures");
    }

    #[test]
    fn test_block_without_task_or_description_is_discarded() {
        let text = "PRIORITY: high\nFILES: a.rs\n---\nTASK: Kept\n";
        let blocks = parse_task_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Kept");
        assert_eq!(blocks[0].description, "");
    }

    #[test]
    fn test_title_falls_back_to_description() {
        let blocks = parse_task_blocks("DESCRIPTION: Wire up logging\nacross services");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Wire up logging");
    }

    #[test]
    fn test_lenient_markdown_keys() {
        let text = "- **TASK:** Add cache\n* **Description**: Use an LRU\n**Estimated Time**: 2h\n";
        let blocks = parse_task_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Add cache");
        assert_eq!(blocks[0].description, "Use an LRU");
        assert_eq!(blocks[0].estimated_duration_ms, Some(2 * HOUR_MS));
    }

    #[test]
    fn test_prose_with_colon_continues_description() {
        let text = "TASK: Docs\nDESCRIPTION: Write guides\nNote: include examples\n";
        let blocks = parse_task_blocks(text);
        assert_eq!(blocks[0].description, "Write guides\nNote: include examples");
    }

    #[test]
    fn test_no_blocks() {
        assert!(parse_task_blocks("").is_empty());
        assert!(parse_task_blocks("I could not come up with tasks.").is_empty());
        assert!(parse_task_blocks("---\n---\n").is_empty());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_ms("2h"), Some(2 * HOUR_MS));
        assert_eq!(parse_duration_ms("90m"), Some(90 * MINUTE_MS));
        assert_eq!(parse_duration_ms("1h 30m"), Some(90 * MINUTE_MS));
        assert_eq!(parse_duration_ms("2 hours"), Some(2 * HOUR_MS));
        assert_eq!(parse_duration_ms("1.5"), Some(90 * MINUTE_MS));
        assert_eq!(parse_duration_ms("3"), Some(3 * HOUR_MS));
        assert_eq!(parse_duration_ms("-1"), None);
        assert_eq!(parse_duration_ms("soon"), None);
        assert_eq!(parse_duration_ms(""), None);
    }
}
