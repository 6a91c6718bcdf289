// src/exec/listing.rs

use tokio::process::Child;
use tracing::{debug, info};

use crate::errors::{PlatformContext, Result};
use crate::exec::command::CommandSpec;
use crate::exec::pipes::{self, ParentEnds};

/// A running listing tool together with the parent ends of its pipes.
#[derive(Debug)]
pub struct ListingProcess {
    pub child: Child,
    pub pipes: ParentEnds,
}

/// Launch the listing tool with stdin, stdout and stderr redirected to pipes.
///
/// The child-facing pipe ends are released in this process as part of the
/// spawn, so the returned [`ParentEnds`] are the only handles left here.
pub fn spawn_listing(spec: &CommandSpec) -> Result<ListingProcess> {
    debug!(cmd = %spec, "starting listing process");

    let mut cmd = spec.to_command();
    pipes::wire_child(&mut cmd).kill_on_drop(false);

    let mut child = cmd.spawn().platform("listing CreateProcess")?;
    let pipes = ParentEnds::take_from(&mut child)?;

    info!(pid = ?child.id(), program = %spec.program(), "listing process started");
    Ok(ListingProcess { child, pipes })
}
