pub mod api_key;
pub mod auth_profile;
pub mod config;
pub mod minimax;
pub mod oauth;
pub mod version;

use crate::config::{load_snapshot, save_snapshot, ConfigFormat, ConfigSnapshot};
use crate::error::Result;
use std::path::PathBuf;

/// Where a patch command reads and writes the config.
#[derive(Debug, Clone)]
pub struct Target {
    pub config_path: PathBuf,
    pub dry_run: bool,
}

impl Target {
    pub fn new(config_path: PathBuf, dry_run: bool) -> Self {
        Self {
            config_path,
            dry_run,
        }
    }

    /// Load the config, apply `patch`, then write it back or print it.
    pub fn apply<F>(&self, patch: F) -> Result<ConfigSnapshot>
    where
        F: FnOnce(ConfigSnapshot) -> ConfigSnapshot,
    {
        let current = load_snapshot(&self.config_path)?;
        let next = patch(current);

        if self.dry_run {
            print!("{}", ConfigFormat::from_path(&self.config_path).render(&next)?);
        } else {
            save_snapshot(&self.config_path, &next)?;
        }
        Ok(next)
    }

    /// Trailing status line; suppressed in dry-run so stdout is only the config.
    pub fn report(&self, message: &str) {
        if !self.dry_run {
            println!("{}", message);
            println!("  Config: {}", self.config_path.display());
        }
    }
}
