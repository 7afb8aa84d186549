//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use nbexport_core::{ProgressReporter, SilentProgress, export_notebooks};
use nbexport_shared::{AppConfig, ExportOptions, init_config, load_config, load_config_from};
use tracing::info;

/// Crates whose log level follows `-v`.
const LOG_TARGETS: &[&str] = &[
    "nbexport",
    "nbexport_core",
    "nbexport_notebook",
    "nbexport_shared",
];

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// nbexport — turn notebook cells into source files.
#[derive(Parser)]
#[command(
    name = "nbexport",
    version,
    about = "Export `# file:` cells from Jupyter notebooks into source files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Export directed cells from one or more notebooks.
    Export {
        /// Notebooks to read, in order.
        #[arg(required = true)]
        notebooks: Vec<PathBuf>,

        /// Directory prefixed to every exported file name.
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Do not insert a blank line after each exported cell.
        #[arg(long)]
        no_separator: bool,

        /// Do not create missing parent directories.
        #[arg(long)]
        no_mkdirs: bool,

        /// Report each notebook read and each file written.
        #[arg(short, long)]
        progress: bool,

        /// Config file to use instead of ~/.nbexport/nbexport.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export {
            notebooks,
            root,
            no_separator,
            no_mkdirs,
            progress,
            config,
        } => {
            let app_config = match config {
                Some(path) => load_config_from(&path)?,
                None => load_config()?,
            };
            let mut options = ExportOptions::from(&app_config);
            if root.is_some() {
                options.root = root;
            }
            if no_separator {
                options.add_newline = false;
            }
            if no_mkdirs {
                options.mkdirs = false;
            }
            if progress {
                options.progress = true;
            }
            cmd_export(&notebooks, &options)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn cmd_export(notebooks: &[PathBuf], options: &ExportOptions) -> Result<()> {
    info!(
        notebooks = notebooks.len(),
        root = ?options.root,
        add_newline = options.add_newline,
        mkdirs = options.mkdirs,
        "exporting notebooks"
    );

    if options.progress {
        let reporter = CliProgress::new();
        export_notebooks(notebooks, options, &reporter)?;
    } else {
        export_notebooks(notebooks, options, &SilentProgress)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn notebook_started(&self, path: &Path, current: usize, total: usize) {
        self.spinner
            .println(format!("Reading notebook {}", path.display()));
        self.spinner
            .set_message(format!("Reading [{current}/{total}] {}", path.display()));
    }

    fn file_written(&self, path: &Path, lines: usize) {
        self.spinner
            .println(format!("Exporting file {} ({lines} lines)", path.display()));
    }

    fn done(&self, files_written: usize) {
        self.spinner.finish_and_clear();
        println!("Exported {files_written} file(s).");
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
