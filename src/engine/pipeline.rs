// src/engine/pipeline.rs

use std::process::ExitStatus;

use tracing::{debug, info};

use crate::config::LaunchConfig;
use crate::errors::Result;
use crate::exec::{run_conversion, spawn_listing, ListingProcess, ParentEnds};
use crate::listfile::{build_list_file, remove_list_file, ListFileSummary};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineReport {
    pub list: ListFileSummary,
    /// Reported for logging only; a failing converter still counts as a run.
    pub conversion_status: ExitStatus,
}

/// Listing tool → list file → conversion tool → cleanup.
///
/// The list file is complete and closed before the conversion tool starts,
/// and it is removed once the conversion tool has exited, whatever its
/// status. On any error this returns immediately without cleaning up: a
/// list file that already exists stays on disk.
pub async fn run_pipeline(cfg: &LaunchConfig) -> Result<PipelineReport> {
    let ListingProcess { mut child, pipes } = spawn_listing(&cfg.listing)?;
    let ParentEnds {
        input,
        mut output,
        mut error,
    } = pipes;

    let list = build_list_file(&cfg.list_file, &mut output, &mut error, cfg.chunk_size).await?;

    drop(input);
    drop(output);
    drop(error);

    match child.wait().await {
        Ok(status) => debug!(exit_code = ?status.code(), "listing process exited"),
        Err(e) => debug!(error = %e, "could not reap listing process"),
    }

    let conversion_status = run_conversion(&cfg.conversion).await?;
    remove_list_file(&cfg.list_file).await;

    info!(
        output = ?cfg.output_file,
        records = list.records,
        "pipeline finished"
    );

    Ok(PipelineReport {
        list,
        conversion_status,
    })
}
