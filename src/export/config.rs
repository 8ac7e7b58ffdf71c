//! Export preferences persistence
//!
//! Stores defaults for the `export` command in ~/.config/xspf-export/config.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persistent export preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default destination directory
    #[serde(default)]
    pub dest: Option<PathBuf>,
    /// Write every playlist directly into the destination, ignoring folders
    #[serde(default)]
    pub flat: bool,
}

impl ExportConfig {
    /// Load the config from its default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save the config to its default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No export config found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read export config from {:?}", path))?;

        let config: Self =
            serde_json::from_str(&contents).with_context(|| "Failed to parse export config")?;

        debug!("Loaded export config: {:?}", config);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize export config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write export config to {:?}", path))?;

        debug!("Saved export config to {:?}", path);
        Ok(())
    }

    /// Destination to use when none is given on the command line
    pub fn dest_or_default(&self) -> PathBuf {
        self.dest.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Flat mode after applying the `--flat` / `--folders` command line flags
    pub fn resolve_flat(&self, flat: bool, folders: bool) -> bool {
        if flat {
            true
        } else if folders {
            false
        } else {
            self.flat
        }
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("xspf-export").join("config.json"))
    }
}
