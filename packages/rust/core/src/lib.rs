//! Export pipeline for nbexport.
//!
//! This crate ties notebook reading and file writing together into the
//! end-to-end [`pipeline::export_notebooks`] workflow.

pub mod pipeline;
pub mod writer;

pub use pipeline::{ProgressReporter, SilentProgress, collect_notebooks, export_notebooks};
pub use writer::{output_path, write_outputs};
