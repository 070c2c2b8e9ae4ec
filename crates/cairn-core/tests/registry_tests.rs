mod common;

use cairn_core::{
    graph::{self, DependencyGraph},
    params::{GenerateOptions, GenerateTasks, Id, ListPlans, TaskRef, UpdateTaskStatus},
    PlanStatus, Priority, RiskLevel,
};
use common::{add_test_task, create_test_plan, create_test_registry};

const HOUR_MS: u64 = 3_600_000;

#[tokio::test]
async fn test_shared_file_orders_later_task_after_earlier() {
    let registry = create_test_registry("");
    let plan = create_test_plan(&registry, "Frontend").await;

    let a = add_test_task(&registry, &plan.id, "A", |p| p.files = vec!["x.ts".to_string()]).await;
    let b = add_test_task(&registry, &plan.id, "B", |p| p.files = vec!["x.ts".to_string()]).await;

    let deps = registry
        .get_dependencies(&TaskRef {
            plan_id: plan.id.clone(),
            task_id: b.id.clone(),
        })
        .await
        .expect("Failed to get dependencies");
    assert_eq!(deps.depends_on, vec![a.id.clone()]);
    assert!(deps.prerequisites.is_empty());

    // Out-of-order input still schedules A first
    let input = vec![b.clone(), a.clone()];
    let graph = DependencyGraph::build(&input);
    let ordered = graph::schedule(input, &graph).expect("Failed to schedule");
    let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
}

#[tokio::test]
async fn test_generated_setup_tasks_are_consolidated() {
    let response = "\
TASK: Setup database
PRIORITY: low
ESTIMATED_TIME: 1h
---
TASK: Setup cache
PRIORITY: low
ESTIMATED_TIME: 90m
";
    let registry = create_test_registry(response);
    let plan = create_test_plan(&registry, "Infra").await;

    let tasks = registry
        .generate_tasks(&GenerateTasks {
            plan_id: plan.id.clone(),
            requirements: "Provision storage".to_string(),
            options: GenerateOptions {
                consolidate: true,
                ..GenerateOptions::default()
            },
        })
        .await
        .expect("Failed to generate tasks");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Setup database (consolidated)");
    assert_eq!(tasks[0].estimated_duration_ms, Some(5 * HOUR_MS / 2));
    assert_eq!(tasks[0].priority, Priority::Low);
}

#[tokio::test]
async fn test_refactor_keyword_overrides_file_count() {
    let registry = create_test_registry("");
    let plan = create_test_plan(&registry, "Auth").await;

    let task = add_test_task(&registry, &plan.id, "Rework auth", |p| {
        p.description = Some("Refactor the auth module across 7 files".to_string());
        p.files = (1..=7).map(|n| format!("src/auth/part{n}.rs")).collect();
    })
    .await;
    assert_eq!(task.risk, Some(RiskLevel::High));
}

#[tokio::test]
async fn test_optional_marker_suppresses_orphan_suggestion() {
    let registry = create_test_registry("");

    let marked = create_test_plan(&registry, "Marked").await;
    add_test_task(&registry, &marked.id, "Cleanup", |p| {
        p.priority = Some("low".to_string());
        p.description = Some("optional cleanup".to_string());
    })
    .await;
    let report = registry
        .validate_plan(&Id { id: marked.id })
        .await
        .expect("Failed to validate");
    assert!(report.is_valid);
    assert!(report.suggestions.is_empty());

    let unmarked = create_test_plan(&registry, "Unmarked").await;
    add_test_task(&registry, &unmarked.id, "Cleanup", |p| {
        p.priority = Some("low".to_string());
        p.description = Some("cleanup".to_string());
    })
    .await;
    let report = registry
        .validate_plan(&Id { id: unmarked.id })
        .await
        .expect("Failed to validate");
    assert_eq!(report.suggestions.len(), 1);
}

#[tokio::test]
async fn test_complete_plan_workflow() {
    let response = "\
TASK: Design API
DESCRIPTION: Sketch the endpoints
PRIORITY: high
FILES: docs/api.md
---
TASK: Implement API
DESCRIPTION: Build the handlers and tests
DEPENDENCIES: Design API
FILES: src/api.rs
---
TASK: Document API
DEPENDENCIES: Implement API
FILES: docs/api.md
";
    let registry = create_test_registry(response);
    let plan = create_test_plan(&registry, "API").await;
    let id = Id { id: plan.id.clone() };

    let tasks = registry
        .generate_tasks(&GenerateTasks {
            plan_id: plan.id.clone(),
            requirements: "Ship a REST API".to_string(),
            options: GenerateOptions::default(),
        })
        .await
        .expect("Failed to generate tasks");
    assert_eq!(tasks.len(), 3);
    // 2.5h base plus file, times 1.5 for tests
    assert_eq!(tasks[1].estimated_duration_ms, Some(3 * HOUR_MS + 45 * 60_000));

    let optimized = registry.optimize_plan(&id).await.expect("Failed to optimize");
    assert_eq!(optimized.tasks.len(), 3);

    let scheduled = registry.schedule_plan(&id).await.expect("Failed to schedule");
    let titles: Vec<&str> = scheduled.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Design API", "Implement API", "Document API"]);

    for task in &scheduled {
        registry
            .update_task_status(&UpdateTaskStatus {
                plan_id: plan.id.clone(),
                task_id: task.id.clone(),
                status: "done".to_string(),
                notes: None,
            })
            .await
            .expect("Failed to update task");
    }

    let finished = registry.get_plan(&id).await.expect("Failed to get plan");
    assert_eq!(finished.status, PlanStatus::Completed);
    assert_eq!(finished.progress, 100.0);

    let completed = registry
        .list_plans(&ListPlans {
            status: Some("completed".to_string()),
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].completed_tasks, 3);

    let metrics = registry.get_metrics().await;
    assert_eq!(metrics.completed_plans, 1);
    assert_eq!(metrics.success_rate, 100.0);
}

#[tokio::test]
async fn test_generate_code_through_registry() {
    let registry = create_test_registry("");
    let plan = create_test_plan(&registry, "Codegen").await;
    let task = add_test_task(&registry, &plan.id, "Scaffold", |_| {}).await;

    let task_ref = TaskRef {
        plan_id: plan.id,
        task_id: task.id,
    };
    let code = registry
        .generate_code(&task_ref)
        .await
        .expect("Failed to generate code");
    assert_eq!(code, "// generated\n");
    let task = registry.get_task(&task_ref).await.expect("Failed to get task");
    assert_eq!(task.notes.len(), 1);
}
