//! Locating, reading and writing the configuration file.

use super::ConfigSnapshot;
use crate::error::{OnboardError, Result};
use crate::utils::path::{expand_tilde, state_dir};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "AGENT_ONBOARD_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, contents: &str) -> Result<T> {
        match self {
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
            ConfigFormat::Toml => Ok(toml::from_str(contents)?),
        }
    }

    pub fn render(&self, snapshot: &ConfigSnapshot) -> Result<String> {
        let mut rendered = match self {
            ConfigFormat::Json => serde_json::to_string_pretty(snapshot)?,
            ConfigFormat::Toml => toml::to_string_pretty(snapshot)?,
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

/// Resolve the config file path with precedence:
/// 1. Explicit path (CLI flag)
/// 2. `AGENT_ONBOARD_CONFIG`
/// 3. `~/.agent-onboard/config.json`
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return expand(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        if !env_path.trim().is_empty() {
            return expand(Path::new(env_path.trim()));
        }
    }

    Ok(state_dir()?.join(DEFAULT_CONFIG_FILE))
}

fn expand(path: &Path) -> Result<PathBuf> {
    expand_tilde(path).ok_or_else(|| {
        OnboardError::InvalidArgument(format!("Cannot expand path: {}", path.display()))
    })
}

/// Load a snapshot. A missing or blank file is an empty snapshot.
pub fn load_snapshot(path: &Path) -> Result<ConfigSnapshot> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, starting empty");
        return Ok(ConfigSnapshot::default());
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(ConfigSnapshot::default());
    }

    let snapshot: ConfigSnapshot = ConfigFormat::from_path(path).parse(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(snapshot)
}

/// Write a snapshot, creating parent directories as needed.
pub fn save_snapshot(path: &Path, snapshot: &ConfigSnapshot) -> Result<()> {
    let rendered = ConfigFormat::from_path(path).render(snapshot)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, rendered)?;

    tracing::info!(path = %path.display(), "wrote config");
    Ok(())
}
