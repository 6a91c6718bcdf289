// src/config/mod.rs

//! Configuration for i2p.
//!
//! Responsibilities:
//! - Define the tool settings and the per-run launch config (`model.rs`).
//! - Load optional tool settings from disk (`loader.rs`).
//! - Validate the loaded values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_env, load_from_path, CONFIG_ENV};
pub use model::{LaunchConfig, ToolsConfig, DEFAULT_EXTENSIONS};
pub use validate::validate_config;
