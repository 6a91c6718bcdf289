// src/engine/mod.rs

//! Orchestration for a single i2p run.
//!
//! Sequencing lives in [`pipeline`]; it owns the listing child, the parent
//! pipe ends and the list file for the duration of the run.

pub mod pipeline;

pub use pipeline::{run_pipeline, PipelineReport};
