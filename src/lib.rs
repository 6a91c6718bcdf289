// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod listfile;
pub mod logging;

use tracing::debug;

use crate::cli::{CliArgs, Invocation};
use crate::engine::run_pipeline;
use crate::errors::Result;
use crate::listfile::list_file_name;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - tool settings (`I2P_CONFIG` or defaults)
/// - argument splitting into output name / filters / pass-through
/// - the listing → list file → conversion pipeline
pub async fn run(args: CliArgs) -> Result<()> {
    let tools = config::load_from_env()?;
    let invocation = Invocation::from_tokens(&args.tokens, &tools.default_extensions)?;
    debug!(?invocation, "parsed invocation");

    let launch = invocation.into_launch_config(&tools, list_file_name())?;
    debug!(
        listing = %launch.listing,
        conversion = %launch.conversion,
        "resolved commands"
    );

    run_pipeline(&launch).await?;
    Ok(())
}
