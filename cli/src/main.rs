// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # civperm
//!
//! Command-line front end for the civic permissions engine. It plays the host
//! application: requests are evaluated against scenario files that describe a
//! component, its participants and their records.
//!
//! ## Commands
//!
//! - `civperm check` - Evaluate a single request against a scenario
//! - `civperm scenario run` - Run every check declared in a scenario
//! - `civperm config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use civic_permissions_core::domain::engine_config::EngineConfigManifest;

mod commands;

use commands::{CheckArgs, ConfigCommand, ScenarioCommand};

/// Evaluate civic-participation permission requests
#[derive(Parser)]
#[command(name = "civperm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "CIVPERM_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level.
    #[arg(long, global = true, env = "CIVPERM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format (compact, json). Defaults to the configured format.
    #[arg(long, global = true, env = "CIVPERM_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one request against a scenario
    #[command(name = "check")]
    Check(CheckArgs),

    /// Scenario operations
    #[command(name = "scenario")]
    Scenario {
        #[command(subcommand)]
        command: ScenarioCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Observability settings only; commands load the full configuration themselves.
    let observability = EngineConfigManifest::load_or_default(cli.config.clone())
        .map(|config| config.spec.observability)
        .unwrap_or_default();
    let level = cli.log_level.unwrap_or(observability.log_level);
    let format = cli.log_format.unwrap_or(observability.log_format);
    init_logging(&level, &format)?;

    match cli.command {
        Commands::Check(args) => commands::check::handle_command(args, cli.config),
        Commands::Scenario { command } => commands::scenario::handle_command(command, cli.config),
        Commands::Config { command } => commands::config::handle_command(command, cli.config),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        other => anyhow::bail!("Unsupported log format '{}'. Use 'compact' or 'json'", other),
    }

    Ok(())
}
