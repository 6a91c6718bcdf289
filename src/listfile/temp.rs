// src/listfile/temp.rs

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs::File;
use tracing::{debug, warn};

use crate::errors::{PlatformContext, Result};

const LIST_FILE_PREFIX: &str = ".i2p";

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
#[cfg(windows)]
const FILE_ATTRIBUTE_TEMPORARY: u32 = 0x100;

/// Name for this run's list file: `.i2p` + 8 hex digits of the millisecond
/// clock, in the current directory.
pub fn list_file_name() -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    list_file_name_for(millis as u32)
}

pub fn list_file_name_for(tick: u32) -> PathBuf {
    PathBuf::from(format!("{LIST_FILE_PREFIX}{tick:08x}"))
}

/// Create (or truncate) the list file for writing.
///
/// On Windows the file is also marked hidden and temporary.
pub async fn create_list_file(path: &Path) -> Result<File> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.attributes(FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_TEMPORARY);
    }

    let file = tokio::fs::OpenOptions::from(options)
        .open(path)
        .await
        .platform("List file CreateFile")?;

    debug!(path = ?path, "created list file");
    Ok(file)
}

/// Delete the list file. A failure is logged and otherwise ignored.
pub async fn remove_list_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = ?path, "removed list file"),
        Err(e) => warn!(path = ?path, error = %e, "failed to remove list file"),
    }
}
