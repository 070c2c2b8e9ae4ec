use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BLOCKS: &str = "\
TASK: Design API
DESCRIPTION: Sketch the endpoints
PRIORITY: high
FILES: docs/api.md
---
TASK: Implement API
DESCRIPTION: Build the handlers
DEPENDENCIES: Design API
FILES: src/api.rs, docs/api.md
";

const CYCLE: &str = "\
TASK: Alpha
DEPENDENCIES: Beta
---
TASK: Beta
DEPENDENCIES: Alpha
";

/// Temporary directory that also serves as XDG_CONFIG_HOME, so a user's real
/// config never leaks into a test.
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

fn cairn_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cairn").expect("Failed to find cairn binary");
    cmd.env("XDG_CONFIG_HOME", dir.path()).arg("--no-color");
    cmd
}

#[test]
fn test_plan_from_response_file() {
    let dir = create_cli_test_environment();
    let response = write_file(&dir, "response.txt", BLOCKS);

    cairn_cmd(&dir)
        .args(["plan", "Ship a REST API", "--name", "Demo", "--response"])
        .arg(&response)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Demo (ID: plan_"))
        .stdout(predicate::str::contains("### Design API"))
        .stdout(predicate::str::contains("### Implement API"))
        .stdout(predicate::str::contains("## Validation: valid"));
}

#[test]
fn test_plan_json_output() {
    let dir = create_cli_test_environment();
    let response = write_file(&dir, "response.txt", BLOCKS);

    let output = cairn_cmd(&dir)
        .args(["plan", "Ship a REST API", "--json", "--optimize", "--response"])
        .arg(&response)
        .output()
        .expect("Failed to run cairn");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    assert_eq!(value["plan"]["name"], "Untitled plan");
    assert_eq!(value["plan"]["status"], "active");
    assert_eq!(value["plan"]["tasks"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["validation"]["is_valid"], true);
}

#[test]
fn test_plan_with_configured_command() {
    let dir = create_cli_test_environment();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"generator": {"command": "sh", "args": ["-c", "cat > /dev/null; printf 'TASK: From command'"]}}"#,
    );

    cairn_cmd(&dir)
        .arg("--config")
        .arg(&config)
        .args(["plan", "Anything"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### From command"));
}

#[test]
fn test_plan_without_generator_fails() {
    let dir = create_cli_test_environment();

    cairn_cmd(&dir)
        .args(["plan", "Anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No generator configured"));
}

#[test]
fn test_validate_reports_cycle() {
    let dir = create_cli_test_environment();
    let file = write_file(&dir, "cycle.txt", CYCLE);

    cairn_cmd(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Circular dependency detected"));
}

#[test]
fn test_validate_valid_file() {
    let dir = create_cli_test_environment();
    let file = write_file(&dir, "blocks.txt", BLOCKS);

    cairn_cmd(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Validation: valid"));
}

#[test]
fn test_validate_reads_stdin() {
    let dir = create_cli_test_environment();

    cairn_cmd(&dir)
        .args(["validate", "-", "--json"])
        .write_stdin(BLOCKS)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_valid\": true"));
}

#[test]
fn test_schedule_orders_dependencies_first() {
    let dir = create_cli_test_environment();
    let file = write_file(&dir, "blocks.txt", "TASK: Deploy\nDEPENDENCIES: Build\n---\nTASK: Build\n");

    cairn_cmd(&dir)
        .arg("schedule")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)1\. ### Build.*2\. ### Deploy").unwrap());
}

#[test]
fn test_schedule_cycle_fails() {
    let dir = create_cli_test_environment();
    let file = write_file(&dir, "cycle.txt", CYCLE);

    cairn_cmd(&dir)
        .arg("schedule")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency"));
}

#[test]
fn test_missing_file_fails() {
    let dir = create_cli_test_environment();

    cairn_cmd(&dir)
        .args(["validate", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));
}
