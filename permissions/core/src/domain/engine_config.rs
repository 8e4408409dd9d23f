// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Engine Configuration Types
//
// Defines the configuration schema for hosts embedding the permission engine:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Fallback component and step settings for fixtures that omit them
// - Denial audit switch
// - Logging settings consumed by the CLI

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::settings::{ComponentSettings, StepSettings};

pub const API_VERSION: &str = "civic-permissions/v1";
pub const KIND: &str = "EngineConfig";

/// Top-level Kubernetes-style engine configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfigManifest {
    /// API version (must be "civic-permissions/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "EngineConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    #[serde(default)]
    pub spec: EngineConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfigSpec {
    /// Settings applied when a fixture does not provide its own
    #[serde(default)]
    pub defaults: SettingsDefaults,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDefaults {
    #[serde(default)]
    pub component_settings: ComponentSettings,

    #[serde(default)]
    pub step_settings: StepSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Emit a WARN audit record for every denied request
    #[serde(default = "default_true")]
    pub log_denials: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_denials: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for EngineConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "default".to_string(),
                labels: None,
            },
            spec: EngineConfigSpec::default(),
        }
    }
}

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "CIVPERM_CONFIG_PATH";
/// Environment variable overriding `spec.audit.log_denials`.
pub const AUDIT_DENIALS_ENV: &str = "CIVPERM_AUDIT_DENIALS";

const CONFIG_FILE_NAME: &str = "civperm-config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineConfigError {
    #[error("unsupported apiVersion '{0}', expected '{expected}'", expected = API_VERSION)]
    UnsupportedApiVersion(String),
    #[error("unsupported kind '{0}', expected '{expected}'", expected = KIND)]
    UnsupportedKind(String),
    #[error("metadata.name must not be empty")]
    MissingName,
    #[error("unsupported log_format '{0}', expected 'compact' or 'json'")]
    UnsupportedLogFormat(String),
}

impl EngineConfigManifest {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid engine config {:?}", path))
    }

    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize engine config")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write engine config {:?}", path))
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Candidate configuration files, most specific first.
    ///
    /// The environment path is listed only when set; the home entry only when
    /// a home directory can be resolved.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .into_iter()
            .collect();
        paths.push(PathBuf::from(".").join(CONFIG_FILE_NAME));
        paths.extend(dirs::home_dir().map(|home| home.join(".civperm").join("config.yaml")));
        paths.push(system_config_path());
        paths
    }

    /// First existing file among [`Self::search_paths`].
    pub fn discover_config() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|path| path.is_file())
    }

    /// Load `explicit` (which must exist), else the discovered file, else defaults.
    /// Environment overrides are applied in every case.
    pub fn load_or_default(explicit: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = match explicit.or_else(Self::discover_config) {
            Some(path) => {
                info!(path = %path.display(), "Loading engine configuration");
                Self::from_yaml_file(&path)?
            }
            None => {
                debug!("No engine configuration file found, using built-in defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(AUDIT_DENIALS_ENV) {
            self.apply_audit_override(&value);
        }
    }

    fn apply_audit_override(&mut self, value: &str) {
        match parse_switch(value) {
            Some(enabled) => {
                info!(enabled, "{} overrides audit.log_denials", AUDIT_DENIALS_ENV);
                self.spec.audit.log_denials = enabled;
            }
            None => warn!(value, "Ignoring unrecognized {}", AUDIT_DENIALS_ENV),
        }
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.api_version != API_VERSION {
            return Err(EngineConfigError::UnsupportedApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(EngineConfigError::UnsupportedKind(self.kind.clone()));
        }
        if self.metadata.name.trim().is_empty() {
            return Err(EngineConfigError::MissingName);
        }
        match self.spec.observability.log_format.as_str() {
            "compact" | "json" => Ok(()),
            other => Err(EngineConfigError::UnsupportedLogFormat(other.to_string())),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(not(windows))]
fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/civperm/config.yaml")
}

#[cfg(windows)]
fn system_config_path() -> PathBuf {
    PathBuf::from(r"C:\ProgramData\Civperm\config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = EngineConfigManifest::default();
        assert_eq!(manifest.api_version, API_VERSION);
        assert_eq!(manifest.kind, KIND);
        assert!(manifest.spec.audit.log_denials);
        assert_eq!(manifest.spec.observability.log_format, "compact");
        assert!(!manifest.spec.defaults.step_settings.votes_enabled);
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let yaml = r#"
apiVersion: civic-permissions/v1
kind: EngineConfig
metadata:
  name: city-council
spec:
  defaults:
    component_settings:
      vote_limit: 3
      collaborative_drafts_enabled: true
    step_settings:
      votes_enabled: true
  audit:
    log_denials: false
"#;
        let manifest = EngineConfigManifest::from_yaml_str(yaml).unwrap();
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.metadata.name, "city-council");
        assert_eq!(manifest.spec.defaults.component_settings.vote_limit, Some(3));
        assert!(manifest.spec.defaults.component_settings.collaborative_drafts_enabled);
        assert!(manifest.spec.defaults.step_settings.votes_enabled);
        assert!(!manifest.spec.audit.log_denials);
        assert_eq!(manifest.spec.observability.log_level, "info");
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("civperm-config.yaml");

        let mut manifest = EngineConfigManifest::default();
        manifest.metadata.name = "roundtrip".to_string();
        manifest.spec.defaults.component_settings.participatory_texts_enabled = true;
        manifest.to_yaml_file(&path).unwrap();

        let loaded = EngineConfigManifest::load_or_default(Some(path)).unwrap();
        assert_eq!(loaded.metadata.name, "roundtrip");
        assert!(loaded.spec.defaults.component_settings.participatory_texts_enabled);
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(EngineConfigManifest::load_or_default(Some(missing)).is_err());
    }

    #[test]
    fn test_invalid_file_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "apiVersion: [").unwrap();

        let err = EngineConfigManifest::from_yaml_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"), "{}", err);
    }

    #[test]
    fn test_search_paths_end_with_system_file() {
        let paths = EngineConfigManifest::search_paths();
        assert!(paths.iter().any(|path| path.ends_with(CONFIG_FILE_NAME)));
        assert_eq!(paths.last(), Some(&system_config_path()));
    }

    #[test]
    fn test_switch_values() {
        assert_eq!(parse_switch(" On "), Some(true));
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch("maybe"), None);
    }

    #[test]
    fn test_audit_override_values() {
        let mut manifest = EngineConfigManifest::default();
        manifest.apply_audit_override("off");
        assert!(!manifest.spec.audit.log_denials);
        manifest.apply_audit_override("maybe");
        assert!(!manifest.spec.audit.log_denials);
        manifest.apply_audit_override("YES");
        assert!(manifest.spec.audit.log_denials);
    }

    #[test]
    fn test_validation() {
        let mut manifest = EngineConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.api_version = "wrong/v1".to_string();
        assert_eq!(
            manifest.validate(),
            Err(EngineConfigError::UnsupportedApiVersion("wrong/v1".to_string()))
        );
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "NodeConfig".to_string();
        assert_eq!(
            manifest.validate(),
            Err(EngineConfigError::UnsupportedKind("NodeConfig".to_string()))
        );
        manifest.kind = KIND.to_string();

        manifest.metadata.name = "  ".to_string();
        assert_eq!(manifest.validate(), Err(EngineConfigError::MissingName));
        manifest.metadata.name = "test".to_string();

        manifest.spec.observability.log_format = "xml".to_string();
        assert_eq!(
            manifest.validate(),
            Err(EngineConfigError::UnsupportedLogFormat("xml".to_string()))
        );
    }
}
