// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::command::CommandSpec;

/// Extensions used when none are given on the command line, or for `*`.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "tif", "tiff", "jp2", "jpa", "jpm", "jpx",
];

/// Longest rendered command line we are willing to launch (cmd.exe's limit).
pub const DEFAULT_MAX_COMMAND_LEN: usize = 8191;

/// Read size used while draining the listing tool's output.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Tool settings, optionally read from the TOML file named by `I2P_CONFIG`.
///
/// ```toml
/// converter = ["python", "-m", "img2pdf"]
/// default_extensions = ["jpg", "png"]
/// max_command_len = 8191
/// chunk_size = 512
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Program (and leading arguments) of the conversion tool.
    #[serde(default = "default_converter")]
    pub converter: Vec<String>,

    #[serde(default = "default_extensions")]
    pub default_extensions: Vec<String>,

    #[serde(default = "default_max_command_len")]
    pub max_command_len: usize,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_converter() -> Vec<String> {
    if cfg!(windows) {
        vec!["img2pdf.exe".to_string()]
    } else {
        vec!["img2pdf".to_string()]
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_max_command_len() -> usize {
    DEFAULT_MAX_COMMAND_LEN
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            converter: default_converter(),
            default_extensions: default_extensions(),
            max_command_len: default_max_command_len(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Everything one invocation needs, resolved once before any process starts.
///
/// Built by [`crate::cli::Invocation::into_launch_config`] and then only read.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Listing tool command, filters already appended.
    pub listing: CommandSpec,

    /// Conversion tool command referencing `list_file` and `output_file`.
    pub conversion: CommandSpec,

    /// Temporary list file, relative to the current directory.
    pub list_file: PathBuf,

    /// `<basename>.pdf`.
    pub output_file: PathBuf,

    pub chunk_size: usize,
}
