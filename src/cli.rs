// src/cli.rs

//! CLI argument handling.
//!
//! `clap` only collects the raw tokens: the grammar below cannot be expressed
//! with flags, because every token starting with `-` belongs to img2pdf.
//!
//! ```text
//! i2p output_file_name [input_ext1 input_ext2 ... | *] [img2pdf arguments]
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::config::{LaunchConfig, ToolsConfig, DEFAULT_EXTENSIONS};
use crate::errors::{I2pError, Result};
use crate::exec::{conversion_command, listing_command};

/// Command-line arguments for `i2p`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "i2p",
    about = "Feeds a sorted image listing of the current directory to img2pdf.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Output name, extensions, then img2pdf arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub tokens: Vec<String>,
}

/// Parse the process arguments.
pub fn parse() -> Result<CliArgs> {
    parse_from(std::env::args_os())
}

/// Parse an argument vector, program name first.
///
/// clap treats a leading `--` as its escape marker and drops it; it is put
/// back so the usage check still sees an option-like first token. Any clap
/// failure (e.g. a non-UTF-8 argument) is a usage error.
pub fn parse_from<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let raw: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let mut parsed = CliArgs::try_parse_from(raw.iter()).map_err(|e| {
        debug!(error = %e, "rejected command line");
        builtin_usage_error()
    })?;

    if raw.get(1).is_some_and(|first| first == "--") {
        parsed.tokens.insert(0, "--".to_string());
    }

    Ok(parsed)
}

fn builtin_usage_error() -> I2pError {
    let defaults: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect();
    I2pError::Usage {
        help: help_text(&defaults),
    }
}

/// A parsed command line, before tool settings are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Output name without the `.pdf` suffix.
    pub output_basename: String,
    /// `*.ext` name filters for the listing tool.
    pub filters: Vec<String>,
    /// Tokens from the first `-` token onward, verbatim.
    pub passthrough: Vec<String>,
}

impl Invocation {
    /// Split the raw tokens into output name, filters and pass-through.
    ///
    /// A missing output name, or one starting with `-` or `/`, is a usage
    /// error carrying the help text.
    pub fn from_tokens(tokens: &[String], default_extensions: &[String]) -> Result<Self> {
        let output_basename = match tokens.first() {
            Some(first) if !is_option_like(first) => first.clone(),
            _ => {
                return Err(I2pError::Usage {
                    help: help_text(default_extensions),
                });
            }
        };

        let rest = &tokens[1..];
        let (filters, consumed) = extension_filters(rest, default_extensions);

        Ok(Self {
            output_basename,
            filters,
            passthrough: rest[consumed..].to_vec(),
        })
    }

    /// `<basename>.pdf`.
    pub fn output_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.pdf", self.output_basename))
    }

    /// Resolve both command lines against the tool settings.
    pub fn into_launch_config(self, tools: &ToolsConfig, list_file: PathBuf) -> Result<LaunchConfig> {
        let output_file = self.output_file();

        let listing = listing_command(&self.filters).ensure_fits(tools.max_command_len)?;
        let conversion = conversion_command(
            &tools.converter,
            &list_file,
            &output_file,
            &self.passthrough,
        )?
        .ensure_fits(tools.max_command_len)?;

        Ok(LaunchConfig {
            listing,
            conversion,
            list_file,
            output_file,
            chunk_size: tools.chunk_size,
        })
    }
}

/// Turn extension tokens into `*.ext` filters.
///
/// Scanning stops at the first token starting with `-`; the returned count is
/// the number of tokens consumed. `*` expands to the default set in place,
/// and the default set is also used when no extension precedes the first
/// flag (or the end of input).
pub fn extension_filters(tokens: &[String], default_extensions: &[String]) -> (Vec<String>, usize) {
    let defaults = || default_extensions.iter().map(|ext| format!("*.{ext}"));

    let consumed = tokens
        .iter()
        .position(|t| t.starts_with('-'))
        .unwrap_or(tokens.len());

    if consumed == 0 {
        return (defaults().collect(), 0);
    }

    let mut filters = Vec::new();
    for token in &tokens[..consumed] {
        if token.starts_with('*') {
            filters.extend(defaults());
        } else {
            filters.push(format!("*.{token}"));
        }
    }

    (filters, consumed)
}

fn is_option_like(token: &str) -> bool {
    token.starts_with('-') || token.starts_with('/')
}

/// Help text shown for usage errors.
pub fn help_text(default_extensions: &[String]) -> String {
    let defaults: String = default_extensions
        .iter()
        .map(|ext| format!(" *.{ext}"))
        .collect();
    let lister = if cfg!(windows) {
        "DIR /ON /A-D-H"
    } else {
        "a sorted listing of regular files"
    };

    format!(
        "Feeds \"{lister}\" result to img2pdf.\n\
         \n\
         i2p output_file_name [input_ext1 input_ext2 ... | *] [img2pdf arguments]\n\
         \n\
         Examples:\n\
         \x20 i2p manual jpg png -D\n\
         \x20   Generate manual.pdf from *.jpg and *.png files and pass -D to img2pdf\n\
         \n\
         \x20 i2p scan\n\
         \x20   Generate scan.pdf from default image types, which are\n\
         \x20  {defaults}\n\
         \n\
         Caution:\n\
         \x20 The target pdf file can be overwritten by img2pdf without prompt!\n"
    )
}
