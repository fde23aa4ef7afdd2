use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_PREFIX: &str = "project-assessment";

/// Settings read from `config.toml`; command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Catalog used instead of the built-in security policy questionnaire.
    pub catalog: Option<PathBuf>,
    /// Directory receiving report files.
    pub output_dir: Option<PathBuf>,
    /// Report files are named `<file_prefix>-<YYYY-MM-DD>.md`.
    pub file_prefix: String,
    /// `tracing` filter directive, e.g. `policy_qa=debug`.
    pub log_filter: Option<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            output_dir: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_filter: None,
        }
    }
}

/// `<config dir>/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "policy-wizard", "policy-wizard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads `explicit` when given (it must exist), else the default location when present.
pub fn load(explicit: Option<&Path>) -> Result<WizardConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        _ => Ok(WizardConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<WizardConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: WizardConfig =
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
