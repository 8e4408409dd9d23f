// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Single request evaluation

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use civic_permissions_core::domain::engine_config::EngineConfigManifest;
use civic_permissions_core::infrastructure::scenario::CheckDocument;
use civic_permissions_core::infrastructure::Scenario;

#[derive(Args)]
pub struct CheckArgs {
    /// Scenario describing the component and its records
    #[arg(short, long, value_name = "FILE")]
    pub scenario: PathBuf,

    /// Acting user (anonymous when omitted)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Request scope (public, admin)
    #[arg(long, default_value = "public")]
    pub scope: String,

    /// Targeted subject (opinion, opinions, collaborative_draft, ...)
    #[arg(long)]
    pub subject: String,

    /// Requested action (create, vote, publish_answers, ...)
    #[arg(long)]
    pub action: String,

    /// Opinion in context
    #[arg(long)]
    pub opinion: Option<String>,

    /// Collaborative draft in context
    #[arg(long)]
    pub draft: Option<String>,

    /// Valuator user in context
    #[arg(long, conflicts_with = "valuator_role")]
    pub valuator: Option<String>,

    /// Valuator role in context, resolved to its user
    #[arg(long)]
    pub valuator_role: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    fn to_check(&self) -> CheckDocument {
        CheckDocument {
            user: self.user.clone(),
            scope: self.scope.clone(),
            subject: self.subject.clone(),
            action: self.action.clone(),
            opinion: self.opinion.clone(),
            draft: self.draft.clone(),
            valuator: self.valuator.clone(),
            valuator_role: self.valuator_role.clone(),
            expect: None,
        }
    }
}

pub fn handle_command(args: CheckArgs, config_override: Option<PathBuf>) -> Result<()> {
    let config = EngineConfigManifest::load_or_default(config_override)
        .context("Failed to load configuration")?;
    let scenario = Scenario::from_yaml_file(&args.scenario, &config)?;

    let check = args.to_check();
    let allowed = scenario.check(&check)?;
    debug!("{} -> {}", check.describe(), allowed);

    if args.json {
        let outcome = serde_json::json!({
            "request": check.describe(),
            "allowed": allowed,
        });
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if allowed {
        println!("{} {}", "ALLOW".green().bold(), check.describe());
    } else {
        println!("{} {}", "DENY".red().bold(), check.describe());
    }

    Ok(())
}
