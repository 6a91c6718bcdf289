// src/config/validate.rs

use crate::config::model::ToolsConfig;
use crate::errors::{I2pError, Result};

/// Run basic semantic validation against loaded tool settings.
///
/// This checks:
/// - `converter` names a program
/// - there is at least one default extension, and each one is a bare token
/// - `max_command_len >= 1`
/// - `chunk_size >= 1`
pub fn validate_config(cfg: &ToolsConfig) -> Result<()> {
    validate_converter(cfg)?;
    validate_extensions(cfg)?;
    validate_limits(cfg)?;
    Ok(())
}

fn validate_converter(cfg: &ToolsConfig) -> Result<()> {
    match cfg.converter.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(I2pError::Config(
            "`converter` must name the conversion program".to_string(),
        )),
    }
}

fn validate_extensions(cfg: &ToolsConfig) -> Result<()> {
    if cfg.default_extensions.is_empty() {
        return Err(I2pError::Config(
            "`default_extensions` must contain at least one extension".to_string(),
        ));
    }

    for ext in cfg.default_extensions.iter() {
        if !is_bare_extension(ext) {
            return Err(I2pError::Config(format!(
                "invalid default extension '{}': expected a bare token such as \"jpg\"",
                ext
            )));
        }
    }
    Ok(())
}

fn validate_limits(cfg: &ToolsConfig) -> Result<()> {
    if cfg.max_command_len == 0 {
        return Err(I2pError::Config(
            "`max_command_len` must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.chunk_size == 0 {
        return Err(I2pError::Config(
            "`chunk_size` must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn is_bare_extension(ext: &str) -> bool {
    !ext.is_empty()
        && !ext.starts_with('-')
        && !ext
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\' || c == '*')
}
