//! Output writer.
//!
//! Materializes a finished [`AccumulationMap`]: one file per target,
//! written under an optional root prefix, truncating whatever was there.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use nbexport_notebook::AccumulationMap;
use nbexport_shared::{NbExportError, Result};

use crate::pipeline::ProgressReporter;

/// Where `target` lands on disk.
///
/// An absolute `target` replaces the root, as with [`Path::join`].
pub fn output_path(root: Option<&Path>, target: &str) -> PathBuf {
    match root {
        Some(root) => root.join(target),
        None => PathBuf::from(target),
    }
}

/// Write every target in `map`. Returns the number of files written.
///
/// Stops at the first failure; files written before it stay on disk.
#[instrument(skip_all, fields(files = map.len(), root = ?root, mkdirs = mkdirs))]
pub fn write_outputs(
    map: &AccumulationMap,
    root: Option<&Path>,
    mkdirs: bool,
    progress: &dyn ProgressReporter,
) -> Result<usize> {
    let mut written = 0;

    for (target, lines) in map.iter() {
        let path = output_path(root, target);

        if mkdirs {
            create_parent_dirs(&path)?;
        }

        write_file(&path, lines)?;
        progress.file_written(&path, lines.len());
        written += 1;
    }

    info!(written, "export complete");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| NbExportError::io(parent, e))?;
    }
    Ok(())
}

/// Write `lines` verbatim; the handle is closed before returning on every path.
fn write_file(path: &Path, lines: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|e| NbExportError::io(path, e))?;
    let mut out = BufWriter::new(file);

    for line in lines {
        out.write_all(line.as_bytes())
            .map_err(|e| NbExportError::io(path, e))?;
    }
    out.flush().map_err(|e| NbExportError::io(path, e))?;

    debug!(path = %path.display(), lines = lines.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentProgress;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "nbexport-writer-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cell(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn output_path_with_and_without_root() {
        assert_eq!(output_path(None, "pkg/a.py"), PathBuf::from("pkg/a.py"));
        assert_eq!(
            output_path(Some(Path::new("build")), "pkg/a.py"),
            PathBuf::from("build/pkg/a.py")
        );
    }

    #[test]
    fn writes_lines_verbatim() {
        let tmp = temp_dir();
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: a.py\n", "x = 1\n", "y = 2"]), false);

        let written = write_outputs(&map, Some(tmp.as_path()), true, &SilentProgress).unwrap();

        assert_eq!(written, 1);
        let content = std::fs::read_to_string(tmp.join("a.py")).unwrap();
        assert_eq!(content, "x = 1\ny = 2");

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn creates_nested_directories() {
        let tmp = temp_dir();
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: pkg/sub/mod.py\n", "pass\n"]), true);
        map.register(&cell(&["# file: \"my dir/my file.py\"\n", "pass\n"]), true);

        write_outputs(&map, Some(tmp.as_path()), true, &SilentProgress).unwrap();

        assert!(tmp.join("pkg/sub/mod.py").is_file());
        assert!(tmp.join("my dir").join("my file.py").is_file());

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn truncates_existing_content() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("a.py"), "a much longer previous body\n".repeat(10)).unwrap();

        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: a.py\n", "short\n"]), false);
        write_outputs(&map, Some(tmp.as_path()), true, &SilentProgress).unwrap();

        assert_eq!(std::fs::read_to_string(tmp.join("a.py")).unwrap(), "short\n");

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn missing_parent_without_mkdirs_fails() {
        let tmp = temp_dir();
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: missing/a.py\n", "x\n"]), true);

        let err = write_outputs(&map, Some(tmp.as_path()), false, &SilentProgress).unwrap_err();
        assert!(matches!(err, NbExportError::Io { .. }));
        assert!(!tmp.join("missing").exists());

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn parent_that_is_a_file_fails() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("pkg"), "not a directory").unwrap();

        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: pkg/a.py\n", "x\n"]), true);

        let err = write_outputs(&map, Some(tmp.as_path()), true, &SilentProgress).unwrap_err();
        match err {
            NbExportError::Io { path, .. } => assert_eq!(path, tmp.join("pkg")),
            other => panic!("unexpected error: {other:?}"),
        }

        std::fs::remove_dir_all(&tmp).ok();
    }
}
