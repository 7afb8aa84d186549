//! Shared error model and configuration for nbexport.
//!
//! This crate is the foundation depended on by all other nbexport crates.
//! It provides:
//! - [`NbExportError`] — the unified error type
//! - Configuration ([`AppConfig`], [`ExportOptions`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ExportDefaults, ExportOptions, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{NbExportError, Result};
