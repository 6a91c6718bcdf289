// src/errors.rs

//! Crate-wide error type.
//!
//! Every fatal condition is carried up to `main` as an [`I2pError`]; nothing
//! below the top-level handler terminates the process on its own.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum I2pError {
    /// Missing or malformed output name. Displays as the help text.
    #[error("{help}")]
    Usage { help: String },

    /// The listing tool reported on its error channel (or produced nothing)
    /// before any output arrived.
    #[error("No Input File")]
    NoInput,

    /// A pipe, file or process operation failed.
    #[error("Error #{}: {}  - {operation}", os_code(.source), os_message(.source))]
    Platform {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("command too long for '{program}': {len} characters (limit {max})")]
    CommandTooLong {
        program: String,
        len: usize,
        max: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl I2pError {
    /// Wrap an I/O error with the name of the operation that failed.
    pub fn platform(operation: &'static str, source: io::Error) -> Self {
        I2pError::Platform { operation, source }
    }
}

fn os_code(err: &io::Error) -> i32 {
    err.raw_os_error().unwrap_or(0)
}

/// The error text without std's trailing ` (os error N)`.
fn os_message(err: &io::Error) -> String {
    let mut text = err.to_string();
    if let Some(code) = err.raw_os_error() {
        let suffix = format!(" (os error {code})");
        if let Some(len) = text.strip_suffix(&suffix).map(str::len) {
            text.truncate(len);
        }
    }
    text
}

/// Extension trait mirroring `anyhow::Context` for platform failures.
pub trait PlatformContext<T> {
    fn platform(self, operation: &'static str) -> Result<T>;
}

impl<T> PlatformContext<T> for io::Result<T> {
    fn platform(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| I2pError::platform(operation, e))
    }
}

pub type Result<T> = std::result::Result<T, I2pError>;
