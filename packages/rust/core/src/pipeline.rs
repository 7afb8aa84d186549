//! End-to-end export pipeline: notebooks → accumulation map → files.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument};

use nbexport_notebook::{AccumulationMap, read_notebook};
use nbexport_shared::{ExportOptions, Result};

use crate::writer::write_outputs;

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called before a notebook is read (`current` is 1-based).
    fn notebook_started(&self, path: &Path, current: usize, total: usize);
    /// Called after an output file has been written.
    fn file_written(&self, path: &Path, lines: usize);
    /// Called when the pipeline completes.
    fn done(&self, files_written: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn notebook_started(&self, _path: &Path, _current: usize, _total: usize) {}
    fn file_written(&self, _path: &Path, _lines: usize) {}
    fn done(&self, _files_written: usize) {}
}

/// Read `notebooks` in order into one accumulation map.
///
/// Nothing is written; the first unreadable notebook aborts the run.
pub fn collect_notebooks<P: AsRef<Path>>(
    notebooks: &[P],
    add_newline: bool,
    progress: &dyn ProgressReporter,
) -> Result<AccumulationMap> {
    let mut map = AccumulationMap::new();
    let total = notebooks.len();

    for (i, path) in notebooks.iter().enumerate() {
        let path = path.as_ref();
        progress.notebook_started(path, i + 1, total);
        read_notebook(&mut map, path, add_newline)?;
    }

    Ok(map)
}

/// Run the full export.
///
/// 1. Read every notebook, in the given order, into a shared map
/// 2. Write each accumulated file once all notebooks are read
///
/// Progress notifications reach `reporter` only when `options.progress` is set.
#[instrument(skip_all, fields(notebooks = notebooks.len(), root = ?options.root))]
pub fn export_notebooks<P: AsRef<Path>>(
    notebooks: &[P],
    options: &ExportOptions,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let start = Instant::now();
    let progress: &dyn ProgressReporter = if options.progress {
        reporter
    } else {
        &SilentProgress
    };

    let map = collect_notebooks(notebooks, options.add_newline, progress)?;
    info!(files = map.len(), "notebooks read");
    debug!(targets = ?map.targets().collect::<Vec<_>>(), "accumulated targets");

    let written = write_outputs(&map, options.root.as_deref(), options.mkdirs, progress)?;
    progress.done(written);

    info!(
        written,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "export pipeline finished"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
