//! Cairn CLI
//!
//! Command-line front-end and MCP server for the cairn planning engine.

mod args;
mod commands;
mod config;
mod generator;
mod mcp;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cairn_core::PlanRegistryBuilder;
use clap::Parser;
use commands::Cli;
use config::CliConfig;
use generator::CommandGenerator;
use log::info;
use mcp::{run_stdio_server, CairnMcpServer};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        no_color,
        verbose,
        command,
    } = Args::parse();

    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = CliConfig::load(config.as_deref()).context("Failed to load configuration")?;
    info!("Cairn started");

    match command {
        Commands::Plan(args) => {
            Cli::new(config, TerminalRenderer::new(!no_color))
                .plan(args)
                .await
        }
        Commands::Validate(args) => Cli::new(config, TerminalRenderer::new(!no_color)).validate(args),
        Commands::Schedule(args) => Cli::new(config, TerminalRenderer::new(!no_color)).schedule(args),
        Commands::Serve => {
            let mut builder = PlanRegistryBuilder::new().with_config(config.engine.clone());
            if let Some(generator) = &config.generator {
                let generator = Arc::new(CommandGenerator::new(generator));
                builder = builder
                    .with_task_generator(generator.clone())
                    .with_code_generator(generator);
            }
            let registry = builder.build().context("Failed to initialize registry")?;

            info!("Starting Cairn MCP server");
            run_stdio_server(CairnMcpServer::new(registry))
                .await
                .context("MCP server failed")
        }
    }
}
