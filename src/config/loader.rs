// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::ToolsConfig;
use crate::config::validate::validate_config;
use crate::errors::{PlatformContext, Result};

/// Environment variable naming an optional TOML settings file.
pub const CONFIG_ENV: &str = "I2P_CONFIG";

/// Load tool settings from a given path.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to also
/// check the values.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ToolsConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).platform("reading config file")?;
    let config: ToolsConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load tool settings from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ToolsConfig> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the settings for this run.
///
/// - `I2P_CONFIG` set: load and validate that file.
/// - unset or empty: built-in defaults.
pub fn load_from_env() -> Result<ToolsConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => {
            debug!(path = ?path, "loading tool settings");
            load_and_validate(&path)
        }
        _ => Ok(ToolsConfig::default()),
    }
}

