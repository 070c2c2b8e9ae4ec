use std::sync::Arc;

use cairn_core::{
    generation::StaticGenerator,
    params::{AddTask, CreatePlan},
    Plan, PlanRegistry, PlanRegistryBuilder, Task,
};

/// Registry whose task generator always answers with `response`.
pub fn create_test_registry(response: &str) -> PlanRegistry {
    PlanRegistryBuilder::new()
        .with_task_generator(Arc::new(StaticGenerator::new(response)))
        .with_code_generator(Arc::new(StaticGenerator::new("// generated\n")))
        .build()
        .expect("Failed to build registry")
}

pub async fn create_test_plan(registry: &PlanRegistry, name: &str) -> Plan {
    registry
        .create_plan(&CreatePlan::new(name))
        .await
        .expect("Failed to create plan")
}

/// Adds a task built by `customize` from a bare title.
pub async fn add_test_task(
    registry: &PlanRegistry,
    plan_id: &str,
    title: &str,
    customize: impl FnOnce(&mut AddTask),
) -> Task {
    let mut params = AddTask {
        plan_id: plan_id.to_string(),
        title: title.to_string(),
        ..AddTask::default()
    };
    customize(&mut params);
    registry.add_task(&params).await.expect("Failed to add task")
}
