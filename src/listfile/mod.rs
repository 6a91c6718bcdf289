// src/listfile/mod.rs

//! The temporary list file handed to the conversion tool.
//!
//! - [`transcode`] turns listing lines into NUL-terminated records.
//! - [`temp`] names, creates and removes the file.
//! - [`builder`] waits for the listing tool and streams its output into the
//!   file.

pub mod builder;
pub mod temp;
pub mod transcode;

pub use builder::{build_list_file, ListFileSummary};
pub use temp::{create_list_file, list_file_name, remove_list_file};
pub use transcode::{split_records, transcode_chunk, RECORD_TERMINATOR};
