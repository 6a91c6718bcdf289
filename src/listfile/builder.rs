// src/listfile/builder.rs

use std::io;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::errors::{I2pError, PlatformContext, Result};
use crate::listfile::temp::create_list_file;
use crate::listfile::transcode::transcode_chunk;

/// Only the presence of error-channel bytes matters, not their content.
const ERROR_PEEK_LEN: usize = 64;

/// What was written to the list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFileSummary {
    /// Records terminated with a NUL byte.
    pub records: usize,
    /// Total bytes written, terminators included.
    pub bytes: u64,
}

/// How the wait for the listing tool's first signal ended.
#[derive(Debug, PartialEq, Eq)]
enum FirstSignal {
    /// Output arrived; these are its first bytes.
    Output(Vec<u8>),
    /// The error channel spoke first, or both channels closed empty.
    Failed,
}

/// Build the list file at `path` from the listing tool's output.
///
/// 1. Wait until either channel delivers bytes. The error channel is always
///    checked first; if it delivers (or both channels close without output)
///    this returns [`I2pError::NoInput`] and no file is created.
/// 2. Otherwise create the list file and drain `output` in `chunk_size`
///    reads through the transcoder until end of stream.
/// 3. Flush and close the file.
///
/// This relies on the listing tool writing its failure message before any
/// output, and never writing output after an error.
pub async fn build_list_file<R, E>(
    path: &Path,
    output: &mut R,
    error: &mut E,
    chunk_size: usize,
) -> Result<ListFileSummary>
where
    R: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    debug!("list file builder: waiting");

    let first = match wait_for_first_signal(output, error, chunk_size).await? {
        FirstSignal::Failed => {
            debug!("list file builder: failed");
            return Err(I2pError::NoInput);
        }
        FirstSignal::Output(bytes) => bytes,
    };

    debug!(first_chunk = first.len(), "list file builder: streaming");

    let mut file = create_list_file(path).await?;
    let mut summary = ListFileSummary {
        records: 0,
        bytes: 0,
    };
    let mut encoded = Vec::with_capacity(chunk_size + 1);

    summary.records += transcode_chunk(&first, &mut encoded);
    write_encoded(&mut file, &encoded, &mut summary).await?;

    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = output.read(&mut buf).await.platform("Stdout ReadFile")?;
        if n == 0 {
            break;
        }
        encoded.clear();
        summary.records += transcode_chunk(&buf[..n], &mut encoded);
        write_encoded(&mut file, &encoded, &mut summary).await?;
    }

    file.flush().await.platform("List file FlushFileBuffers")?;
    drop(file);

    info!(
        path = ?path,
        records = summary.records,
        bytes = summary.bytes,
        "list file written"
    );
    Ok(summary)
}

async fn write_encoded(
    file: &mut tokio::fs::File,
    encoded: &[u8],
    summary: &mut ListFileSummary,
) -> Result<()> {
    if encoded.is_empty() {
        return Ok(());
    }
    file.write_all(encoded).await.platform("List file WriteFile")?;
    summary.bytes += encoded.len() as u64;
    Ok(())
}

async fn wait_for_first_signal<R, E>(
    output: &mut R,
    error: &mut E,
    chunk_size: usize,
) -> Result<FirstSignal>
where
    R: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut output_open = true;
    let mut error_open = true;

    while output_open || error_open {
        tokio::select! {
            biased;

            res = read_some(error, ERROR_PEEK_LEN), if error_open => {
                let bytes = res.platform("Stderr PeekNamedPipe")?;
                if bytes.is_empty() {
                    debug!("listing error channel closed");
                    error_open = false;
                } else {
                    debug!(
                        message = %String::from_utf8_lossy(&bytes).trim_end(),
                        "listing tool reported an error"
                    );
                    return Ok(FirstSignal::Failed);
                }
            }

            res = read_some(output, chunk_size), if output_open => {
                let bytes = res.platform("Stdout PeekNamedPipe")?;
                if bytes.is_empty() {
                    debug!("listing output channel closed");
                    output_open = false;
                } else {
                    return Ok(FirstSignal::Output(bytes));
                }
            }
        }
    }

    debug!("listing tool closed both channels without output");
    Ok(FirstSignal::Failed)
}

/// One read of at most `len` bytes. An empty result means end of stream.
async fn read_some<R>(reader: &mut R, len: usize) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; len];
    let n = reader.read(&mut buf).await?;
    buf.truncate(n);
    Ok(buf)
}
