use std::path::PathBuf;

use cairn_core::params::{CreatePlan, GenerateOptions};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Break requirements into an ordered, validated plan of tasks
///
/// Cairn asks a text-generation command for a task breakdown, derives the
/// dependency graph from explicit prerequisites and shared files, orders the
/// tasks, merges small related ones and reports structural problems. It can
/// also run as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "cairn")]
pub struct Args {
    /// Path to a JSON config file. Defaults to $XDG_CONFIG_HOME/cairn/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a plan from requirements and print it
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Validate the tasks in a block file
    #[command(alias = "v")]
    Validate(BlockFileArgs),
    /// Print the tasks in a block file in dependency order
    #[command(alias = "s")]
    Schedule(BlockFileArgs),
    /// Start the MCP server on stdio
    Serve,
}

#[derive(ClapArgs)]
pub struct PlanArgs {
    /// Natural-language requirements to decompose
    pub requirements: String,

    #[arg(short, long, default_value = "Untitled plan", help = "Name of the plan")]
    pub name: String,

    #[arg(short, long, help = "Optional description of the plan")]
    pub description: Option<String>,

    #[arg(long, help = "Kind of project, e.g. web, cli, library")]
    pub project_type: Option<String>,

    #[arg(long, help = "Framework in use, e.g. axum, react")]
    pub framework: Option<String>,

    #[arg(long, help = "Complexity hint, e.g. low, high")]
    pub complexity: Option<String>,

    #[arg(long, help = "Keep at most this many generated tasks")]
    pub max_tasks: Option<usize>,

    #[arg(
        long,
        help = "Read the generator response from this file instead of running the configured command"
    )]
    pub response: Option<PathBuf>,

    #[arg(long, help = "Reorder and consolidate the plan after generation")]
    pub optimize: bool,

    #[arg(long, help = "Merge small related tasks right after generation")]
    pub consolidate: bool,

    #[arg(long, help = "Print JSON instead of markdown")]
    pub json: bool,
}

impl PlanArgs {
    pub fn create_params(&self) -> CreatePlan {
        let mut params = CreatePlan::new(self.name.clone());
        params.description = self.description.clone();
        params.context.project_type = self.project_type.clone();
        params.context.framework = self.framework.clone();
        params.context.complexity = self.complexity.clone();
        params
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            max_tasks: self.max_tasks,
            consolidate: self.consolidate,
            ..GenerateOptions::default()
        }
    }
}

#[derive(ClapArgs)]
pub struct BlockFileArgs {
    /// File in the `---` separated block format, or `-` for stdin
    pub file: PathBuf,

    #[arg(long, help = "Print JSON instead of markdown")]
    pub json: bool,
}
