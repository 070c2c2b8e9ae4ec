//! Handlers for the one-shot commands.
//!
//! Each command works on a fresh in-memory registry or directly on the core
//! algorithms; nothing outlives the process.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use cairn_core::{
    display::Tasks,
    generation::{parse_task_blocks, tasks_from_blocks, StaticGenerator},
    graph::{self, DependencyGraph},
    heuristics::{DurationEstimator, RiskAssessor},
    params::{GenerateTasks, Id},
    store::TaskStore,
    validator::PlanValidator,
    PlanRegistryBuilder, PlannerError, Task, TaskGenerator,
};
use log::info;
use serde_json::json;

use crate::{
    args::{BlockFileArgs, PlanArgs},
    config::CliConfig,
    generator::CommandGenerator,
    renderer::TerminalRenderer,
};

const LOCAL_PLAN_ID: &str = "local";

pub struct Cli {
    config: CliConfig,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(config: CliConfig, renderer: TerminalRenderer) -> Self {
        Self { config, renderer }
    }

    /// Runs create, generate, optional optimize and validate on one plan.
    pub async fn plan(&self, args: PlanArgs) -> Result<()> {
        let generator: Arc<dyn TaskGenerator> = match (&args.response, &self.config.generator) {
            (Some(path), _) => Arc::new(StaticGenerator::new(read_input(path)?)),
            (None, Some(config)) => Arc::new(CommandGenerator::new(config)),
            (None, None) => bail!(
                "No generator configured: pass --response <FILE> or set generator.command in the config file"
            ),
        };

        let registry = PlanRegistryBuilder::new()
            .with_config(self.config.engine.clone())
            .with_task_generator(generator)
            .build()
            .context("Failed to initialize registry")?;

        let plan = registry.create_plan(&args.create_params()).await?;
        let id = Id {
            id: plan.id.clone(),
        };

        let tasks = registry
            .generate_tasks(&GenerateTasks {
                plan_id: plan.id.clone(),
                requirements: args.requirements.clone(),
                options: args.generate_options(),
            })
            .await
            .context("Failed to generate tasks")?;
        info!("Generated {} tasks", tasks.len());

        let plan = if args.optimize {
            registry
                .optimize_plan(&id)
                .await
                .context("Failed to optimize plan")?
        } else {
            registry.get_plan(&id).await?
        };
        let report = registry.validate_plan(&id).await?;

        if args.json {
            self.renderer
                .render_json(&json!({ "plan": plan, "validation": report }))
        } else {
            self.renderer.render(&format!("{plan}\n{report}"));
            Ok(())
        }
    }

    /// Validates a block file; fails when the plan has a cycle.
    pub fn validate(&self, args: BlockFileArgs) -> Result<()> {
        let store = self.load_blocks(&args.file)?;
        let graph = DependencyGraph::build(store.as_slice());
        let report = PlanValidator::new(&self.config.engine).validate(store.as_slice(), &graph);

        if args.json {
            self.renderer.render_json(&report)?;
        } else {
            self.renderer.render(&report.to_string());
        }

        if !report.is_valid {
            bail!("{} has {} issues", args.file.display(), report.issues.len());
        }
        Ok(())
    }

    /// Prints a block file's tasks in dependency order.
    pub fn schedule(&self, args: BlockFileArgs) -> Result<()> {
        let store = self.load_blocks(&args.file)?;
        let graph = DependencyGraph::build(store.as_slice());
        let ordered = graph::schedule(store.as_slice().to_vec(), &graph)?;

        if args.json {
            self.renderer.render_json(&ordered)
        } else {
            self.renderer.render(&Tasks(ordered).to_string());
            Ok(())
        }
    }

    fn load_blocks(&self, path: &Path) -> Result<TaskStore> {
        let blocks = parse_task_blocks(&read_input(path)?);
        if blocks.is_empty() {
            bail!("No task blocks found in {}", path.display());
        }

        let mut tasks: Vec<Task> = tasks_from_blocks(LOCAL_PLAN_ID, &blocks, &[]);
        DurationEstimator::new(&self.config.engine).apply(&mut tasks);
        RiskAssessor::new(&self.config.engine).apply(&mut tasks);
        Ok(TaskStore::from_tasks(tasks))
    }
}

/// Reads a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String, PlannerError> {
    let io_error = |source| PlannerError::FileSystem {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map_err(io_error)?;
        Ok(input)
    } else {
        fs::read_to_string(path).map_err(io_error)
    }
}
