// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Scenario commands
//!
//! Commands: run, quota

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use civic_permissions_core::application::VoteQuota;
use civic_permissions_core::domain::engine_config::EngineConfigManifest;
use civic_permissions_core::infrastructure::{Scenario, ScenarioReport};

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Run every check of a scenario and compare with the expectations
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the vote quota of a user
    Quota {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long)]
        user: String,
    },
}

pub fn handle_command(command: ScenarioCommand, config_override: Option<PathBuf>) -> Result<()> {
    let config = EngineConfigManifest::load_or_default(config_override)
        .context("Failed to load configuration")?;

    match command {
        ScenarioCommand::Run { file, json } => run(&file, &config, json),
        ScenarioCommand::Quota { file, user } => quota(&file, &config, &user),
    }
}

fn run(file: &Path, config: &EngineConfigManifest, json: bool) -> Result<()> {
    let scenario = Scenario::from_yaml_file(file, config)?;
    let report = scenario.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&scenario.name, &report);
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{} of {} checks failed", failed, report.outcomes.len());
    }
    Ok(())
}

fn print_report(name: &str, report: &ScenarioReport) {
    println!("{} {}", "Scenario:".bold(), name);
    for outcome in &report.outcomes {
        let verdict = if outcome.allowed { "allow".green() } else { "deny".red() };
        let mark = if outcome.passed() { "✓".green() } else { "✗".red() };
        match outcome.expected {
            Some(expected) if !outcome.passed() => println!(
                "  {} {} -> {} (expected {:?})",
                mark, outcome.description, verdict, expected
            ),
            _ => println!("  {} {} -> {}", mark, outcome.description, verdict),
        }
    }
}

fn quota(file: &Path, config: &EngineConfigManifest, user: &str) -> Result<()> {
    let scenario = Scenario::from_yaml_file(file, config)?;
    match scenario.vote_quota(user)? {
        VoteQuota::Unlimited => println!("{}: {}", user, "unlimited votes".dimmed()),
        quota @ VoteQuota::Limited { limit, used } => println!(
            "{}: {} of {} votes used, {} remaining",
            user,
            used,
            limit,
            quota.remaining()
        ),
    }
    Ok(())
}
