// src/exec/convert.rs

use std::process::ExitStatus;

use tracing::{debug, info};

use crate::errors::{PlatformContext, Result};
use crate::exec::command::CommandSpec;

/// Run the conversion tool with the console inherited and wait for it.
///
/// The exit status is logged and returned but i2p never acts on it.
pub async fn run_conversion(spec: &CommandSpec) -> Result<ExitStatus> {
    debug!(cmd = %spec, "starting conversion process");

    let status = spec
        .to_command()
        .status()
        .await
        .platform("conversion CreateProcess")?;

    info!(
        program = %spec.program(),
        exit_code = ?status.code(),
        success = status.success(),
        "conversion process exited"
    );
    Ok(status)
}
