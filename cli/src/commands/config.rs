// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `civperm config`: inspect, check and scaffold the engine config file.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use civic_permissions_core::domain::engine_config::EngineConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective engine configuration
    Show {
        /// Also list the candidate config files and which one is in use
        #[arg(long)]
        paths: bool,
    },

    /// Check a config file (or the discovered one) against the schema
    Validate {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Write a starter config file
    Generate {
        #[arg(short, long, default_value = "./civperm-config.yaml")]
        output: PathBuf,

        /// Use the annotated template with every section filled in
        #[arg(long)]
        examples: bool,

        /// Replace an existing file at the output path
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate {
            output,
            examples,
            force,
        } => generate(&output, examples, force),
    }
}

/// The file `load_or_default` would read, if any.
fn active_source(config_override: Option<&PathBuf>) -> Option<PathBuf> {
    config_override
        .cloned()
        .or_else(EngineConfigManifest::discover_config)
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let source = active_source(config_override.as_ref());
    let config = EngineConfigManifest::load_or_default(config_override)
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Search order:".bold());
        for candidate in EngineConfigManifest::search_paths() {
            let marker = if source.as_ref() == Some(&candidate) {
                "*".green().to_string()
            } else if candidate.is_file() {
                "+".to_string()
            } else {
                " ".to_string()
            };
            println!("  {} {}", marker, candidate.display());
        }
        println!();
    }

    let origin = source
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    println!("{} {} ({})", "Engine:".bold(), config.metadata.name, origin.dimmed());
    println!();
    print_defaults(&config);

    let spec = &config.spec;
    println!("{}", "Runtime:".bold());
    println!("  audit.log_denials = {}", spec.audit.log_denials);
    println!("  observability.log_level = {}", spec.observability.log_level);
    println!("  observability.log_format = {}", spec.observability.log_format);

    Ok(())
}

fn print_defaults(config: &EngineConfigManifest) {
    let component = &config.spec.defaults.component_settings;
    let vote_limit = component
        .effective_vote_limit()
        .map(|limit| limit.to_string())
        .unwrap_or_else(|| "unlimited".to_string());

    println!("{}", "Fallback component settings:".bold());
    for (key, value) in [
        ("official_opinions_enabled", component.official_opinions_enabled.to_string()),
        ("opinion_answering_enabled", component.opinion_answering_enabled.to_string()),
        ("participatory_texts_enabled", component.participatory_texts_enabled.to_string()),
        ("collaborative_drafts_enabled", component.collaborative_drafts_enabled.to_string()),
        ("vote_limit", vote_limit),
        ("opinion_edit_before_minutes", component.opinion_edit_before_minutes.to_string()),
    ] {
        println!("  {} = {}", key, value);
    }
    println!();

    let step = &config.spec.defaults.step_settings;
    println!("{}", "Fallback step settings:".bold());
    for (key, value) in [
        ("creation_enabled", step.creation_enabled),
        ("votes_enabled", step.votes_enabled),
        ("votes_blocked", step.votes_blocked),
        ("votes_hidden", step.votes_hidden),
        ("opinion_answering_enabled", step.opinion_answering_enabled),
        ("amendments_enabled", step.amendments_enabled),
        ("publish_answers_immediately", step.publish_answers_immediately),
    ] {
        println!("  {} = {}", key, value);
    }
    println!();
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    let Some(path) = active_source(config_path.as_ref()) else {
        println!("{}", "No config file found; built-in defaults are always valid".yellow());
        return Ok(());
    };

    let config = EngineConfigManifest::from_yaml_file(&path)?;
    config
        .validate()
        .with_context(|| format!("{} failed validation", path.display()))?;

    println!("{} {}", "✓".green(), path.display());
    Ok(())
}

fn generate(output: &Path, with_examples: bool, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (pass --force to replace it)", output.display());
    }

    let template = match with_examples {
        true => include_str!("../../templates/config-with-examples.yaml"),
        false => include_str!("../../templates/config-minimal.yaml"),
    };
    std::fs::write(output, template)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{} {}", "✓ Wrote".green(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_templates_are_valid() {
        let dir = tempfile::tempdir().unwrap();
        for examples in [false, true] {
            let output = dir.path().join(format!("config-{}.yaml", examples));
            generate(&output, examples, false).unwrap();

            let config = EngineConfigManifest::from_yaml_file(&output).unwrap();
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_generate_keeps_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("civperm-config.yaml");
        std::fs::write(&output, "keep me").unwrap();

        assert!(generate(&output, false, false).is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");

        generate(&output, false, true).unwrap();
        assert!(EngineConfigManifest::from_yaml_file(&output).is_ok());
    }

    #[test]
    fn test_validate_reports_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(
            &path,
            "apiVersion: civic-permissions/v1\nkind: EngineConfig\nmetadata:\n  name: \"\"\n",
        )
        .unwrap();

        let err = validate(Some(path)).unwrap_err();
        assert!(format!("{:#}", err).contains("metadata.name"), "{:#}", err);
    }
}
