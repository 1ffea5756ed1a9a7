//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use shipx_core::ShipxConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shipx")
        .join("config.json")
}

/// Configuration file in effect: the override if given, else the default path.
pub fn config_path(override_path: Option<&Path>) -> PathBuf {
    override_path.map_or_else(default_config_path, Path::to_path_buf)
}

/// Load the configuration for a run.
///
/// An explicit path must exist. Without one, the user configuration is used
/// when present and the built-in defaults otherwise.
pub fn load_config(override_path: Option<&Path>) -> anyhow::Result<ShipxConfig> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(ShipxConfig::default());
            }
            path
        }
    };

    debug!("Loading configuration from {}", path.display());
    ShipxConfig::from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}
