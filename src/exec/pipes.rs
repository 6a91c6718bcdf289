// src/exec/pipes.rs

//! The three standard-handle pipes wired between i2p and the listing tool.
//!
//! `tokio::process` creates each pipe at spawn time. The child-facing end
//! (stdin read, stdout write, stderr write) is inherited by the child and
//! closed in the parent as soon as the child has started; the parent-facing
//! end is created non-inheritable (`O_CLOEXEC` on Unix, no
//! `HANDLE_FLAG_INHERIT` on Windows). The parent therefore never holds both
//! ends of a pipe once the child runs, and the child sees end-of-stream on
//! stdin only when [`ParentEnds::input`] is dropped.

use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

use crate::errors::{I2pError, Result};

/// Request a fresh pipe for each of the child's standard handles.
pub fn wire_child(cmd: &mut Command) -> &mut Command {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
}

/// The parent-retained ends of the three pipes.
#[derive(Debug)]
pub struct ParentEnds {
    /// Input-feed write end. Held open until the list file is complete.
    pub input: ChildStdin,
    /// Output-capture read end.
    pub output: ChildStdout,
    /// Error-capture read end.
    pub error: ChildStderr,
}

impl ParentEnds {
    /// Take ownership of the parent ends from a child started with
    /// [`wire_child`].
    pub fn take_from(child: &mut Child) -> Result<Self> {
        let input = child.stdin.take().ok_or_else(|| missing("Stdin CreatePipe"))?;
        let output = child
            .stdout
            .take()
            .ok_or_else(|| missing("Stdout CreatePipe"))?;
        let error = child
            .stderr
            .take()
            .ok_or_else(|| missing("Stderr CreatePipe"))?;

        Ok(Self {
            input,
            output,
            error,
        })
    }
}

fn missing(operation: &'static str) -> I2pError {
    I2pError::platform(
        operation,
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe end not available"),
    )
}
