// src/exec/command.rs

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use tokio::process::Command;

use crate::errors::{I2pError, Result};

/// Fixed script run by `sh` on Unix to list matching files.
///
/// One entry per line, files only (symlinks followed, like `dir`), dot-files
/// excluded, sorted bytewise. The `-iname` tests arrive as positional
/// parameters so user-supplied extensions never become part of the script
/// text.
const UNIX_LISTING_SCRIPT: &str = concat!(
    "find -L . -maxdepth 1 -type f ! -name '.*' \\( \"$@\" \\) -print",
    " | sed 's|^\\./||' | LC_ALL=C sort",
);

/// A program name plus its arguments, fully resolved before launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Length of the command line as it would be rendered for the OS.
    pub fn rendered_len(&self) -> usize {
        self.args
            .iter()
            .fold(self.program.len(), |acc, a| acc + 1 + a.len())
    }

    /// Fail with [`I2pError::CommandTooLong`] instead of truncating.
    pub fn ensure_fits(self, max: usize) -> Result<Self> {
        let len = self.rendered_len();
        if len > max {
            return Err(I2pError::CommandTooLong {
                program: self.program,
                len,
                max,
            });
        }
        Ok(self)
    }

    /// A `tokio` command with program and arguments set, stdio untouched.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in self.args.iter() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build the platform listing command for the given `*.ext` filters.
pub fn listing_command(filters: &[String]) -> CommandSpec {
    if cfg!(windows) {
        CommandSpec::new("cmd.exe")
            .args(["/A", "/C", "dir", "/B", "/ON", "/A-D-H"])
            .args(filters.iter().cloned())
    } else {
        let mut tests = Vec::with_capacity(filters.len() * 3);
        for (i, filter) in filters.iter().enumerate() {
            if i > 0 {
                tests.push("-o".to_string());
            }
            tests.push("-iname".to_string());
            tests.push(filter.clone());
        }
        CommandSpec::new("sh")
            .args(["-c", UNIX_LISTING_SCRIPT, "i2p-list"])
            .args(tests)
    }
}

/// Build the conversion command:
/// `<converter...> --from-file <list> -o <output> <passthrough...>`.
pub fn conversion_command(
    converter: &[String],
    list_file: &Path,
    output_file: &Path,
    passthrough: &[String],
) -> Result<CommandSpec> {
    let (program, leading) = converter
        .split_first()
        .ok_or_else(|| I2pError::Config("no conversion program configured".to_string()))?;

    Ok(CommandSpec::new(program.clone())
        .args(leading.iter().cloned())
        .arg("--from-file")
        .arg(path_arg(list_file.as_os_str()))
        .arg("-o")
        .arg(path_arg(output_file.as_os_str()))
        .args(passthrough.iter().cloned()))
}

fn path_arg(path: &OsStr) -> String {
    path.to_string_lossy().into_owned()
}
