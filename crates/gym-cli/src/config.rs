//! Configuration file management for gym.
//!
//! Provides a TOML-based config file at `~/.config/gym/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use gym_db::config::StoreConfig;

/// Name shown in the welcome line when nothing is configured.
pub const DEFAULT_OWNER: &str = "Owner";

/// Environment variable that overrides the owner name.
pub const OWNER_ENV_VAR: &str = "GYM_OWNER";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    /// Path of the roster JSON file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Name greeted on the main menu.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the gym config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/gym` or `~/.config/gym`.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("gym");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gym")
}

/// Return the path to the gym config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct GymConfig {
    pub store_config: StoreConfig,
    pub owner: String,
}

impl GymConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Data file: `cli_data_file` > `GYM_DATA_FILE` env > `store.data_file` > `gym.json`
    /// - Owner: `cli_owner` > `GYM_OWNER` env > `display.owner` > `Owner`
    ///
    /// A missing config file is normal; an unparseable one is logged and
    /// ignored.
    pub fn resolve(cli_data_file: Option<PathBuf>, cli_owner: Option<String>) -> Self {
        let path = config_path();
        let file_config = if path.exists() {
            load_config()
                .inspect_err(|e| warn!(error = %format!("{e:#}"), "ignoring config file"))
                .ok()
        } else {
            None
        };

        let store_config = match cli_data_file {
            Some(path) => StoreConfig::new(path),
            None => StoreConfig::from_env_or(
                file_config
                    .as_ref()
                    .and_then(|c| c.store.data_file.clone())
                    .unwrap_or_else(|| PathBuf::from(StoreConfig::DEFAULT_PATH)),
            ),
        };

        let owner = cli_owner
            .or_else(|| non_empty_env(OWNER_ENV_VAR))
            .or_else(|| file_config.as_ref().and_then(|c| c.display.owner.clone()))
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());

        Self {
            store_config,
            owner,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
