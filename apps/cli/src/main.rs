//! nbexport CLI — build source files out of Jupyter notebooks.
//!
//! Cells starting with a `# file: <name>` line are collected, in notebook
//! order, into `<name>`.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
