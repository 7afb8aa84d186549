//! Error types for nbexport.
//!
//! Library crates use [`NbExportError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all nbexport operations.
#[derive(Debug, thiserror::Error)]
pub enum NbExportError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A notebook is not valid JSON.
    #[error("parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A notebook is valid JSON but matches neither known cell layout.
    #[error("schema error in {path:?}: {message}")]
    Schema { path: PathBuf, message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NbExportError>;

impl NbExportError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error for the notebook at `path`.
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a schema error for the notebook at `path`.
    pub fn schema(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = NbExportError::config("bad toml");
        assert_eq!(err.to_string(), "config error: bad toml");

        let err = NbExportError::schema("nb/intro.ipynb", "missing `cells` list");
        let text = err.to_string();
        assert!(text.contains("intro.ipynb"));
        assert!(text.contains("missing `cells` list"));
    }

    #[test]
    fn io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = NbExportError::io("/out/lib.py", source);
        match err {
            NbExportError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/out/lib.py"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
