// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] builds the listing and conversion command lines.
//! - [`pipes`] wires the listing tool's standard handles to pipes.
//! - [`listing`] launches the listing tool.
//! - [`convert`] runs the conversion tool to completion.

pub mod command;
pub mod convert;
pub mod listing;
pub mod pipes;

pub use command::{conversion_command, listing_command, CommandSpec};
pub use convert::run_conversion;
pub use listing::{spawn_listing, ListingProcess};
pub use pipes::ParentEnds;
