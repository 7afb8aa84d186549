//! Application configuration for nbexport.
//!
//! User config lives at `~/.nbexport/nbexport.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NbExportError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "nbexport.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".nbexport";

// ---------------------------------------------------------------------------
// Config structs (matching nbexport.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Export defaults.
    #[serde(default)]
    pub export: ExportDefaults,
}

/// `[export]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Prefix joined in front of every exported file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Append a blank line after every exported cell.
    #[serde(default = "default_true")]
    pub add_newline: bool,

    /// Create missing parent directories of exported files.
    #[serde(default = "default_true")]
    pub mkdirs: bool,

    /// Report each notebook read and each file written.
    #[serde(default)]
    pub progress: bool,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            root: None,
            add_newline: true,
            mkdirs: true,
            progress: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Export options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime export options — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output root prefix; `None` writes relative to the working directory.
    pub root: Option<PathBuf>,
    /// Insert one blank line after each merged cell.
    pub add_newline: bool,
    /// Create parent directories before writing.
    pub mkdirs: bool,
    /// Deliver progress notifications.
    pub progress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ExportOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            root: config.export.root.as_ref().map(PathBuf::from),
            add_newline: config.export.add_newline,
            mkdirs: config.export.mkdirs,
            progress: config.export.progress,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.nbexport/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| NbExportError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.nbexport/nbexport.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| NbExportError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| NbExportError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| NbExportError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| NbExportError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| NbExportError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
