//! `.ipynb` loading for the two cell layouts.
//!
//! - `nbformat >= 4`: top-level `cells`, cell text in `source`
//! - `nbformat < 4`: `worksheets[0].cells`, cell text in `input`
//!
//! Cell text may be stored as a list of lines or as a single string; both
//! are normalized to a list of lines that each keep their trailing `\n`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, instrument};

use nbexport_shared::{NbExportError, Result};

use crate::accumulator::AccumulationMap;

/// First `nbformat` major version using the top-level `cells` layout.
pub const MODERN_NBFORMAT: f64 = 4.0;

// ---------------------------------------------------------------------------
// Cell types
// ---------------------------------------------------------------------------

/// A cell from an `nbformat >= 4` notebook.
#[derive(Debug, Clone, Deserialize)]
pub struct ModernCell {
    #[serde(deserialize_with = "lines")]
    source: Vec<String>,
}

/// A cell from an `nbformat < 4` notebook.
#[derive(Debug, Clone)]
pub struct LegacyCell {
    input: Vec<String>,
}

/// A cell of either layout, chosen once per notebook.
#[derive(Debug, Clone)]
pub enum Cell {
    Modern(ModernCell),
    Legacy(LegacyCell),
}

impl Cell {
    /// The cell's text, one entry per line.
    pub fn lines(&self) -> &[String] {
        match self {
            Cell::Modern(cell) => &cell.source,
            Cell::Legacy(cell) => &cell.input,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw JSON shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ModernNotebook {
    cells: Vec<ModernCell>,
}

#[derive(Deserialize)]
struct LegacyNotebook {
    worksheets: Vec<Worksheet>,
}

#[derive(Deserialize)]
struct Worksheet {
    cells: Vec<RawLegacyCell>,
}

#[derive(Deserialize)]
struct RawLegacyCell {
    #[serde(default, deserialize_with = "optional_lines")]
    input: Option<Vec<String>>,
}

/// Multiline text as stored in notebooks.
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineText {
    Lines(Vec<String>),
    Text(String),
}

impl MultilineText {
    fn into_lines(self) -> Vec<String> {
        match self {
            MultilineText::Lines(lines) => lines,
            MultilineText::Text(text) => text.split_inclusive('\n').map(String::from).collect(),
        }
    }
}

fn lines<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    MultilineText::deserialize(d).map(MultilineText::into_lines)
}

fn optional_lines<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<String>>, D::Error> {
    Option::<MultilineText>::deserialize(d).map(|text| text.map(MultilineText::into_lines))
}

// ---------------------------------------------------------------------------
// Notebook
// ---------------------------------------------------------------------------

/// A parsed notebook: its path, format version, and ordered cells.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub path: PathBuf,
    /// Format version as stored; `4` and `4.0` are both accepted.
    pub nbformat: f64,
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Read and parse the notebook at `path` (UTF-8 JSON).
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| NbExportError::io(path, e))?;
        Self::parse(path, &text)
    }

    /// Parse notebook JSON; `path` is only used for error context.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| NbExportError::parse(path, e.to_string()))?;

        let nbformat = value
            .get("nbformat")
            .and_then(Value::as_f64)
            .ok_or_else(|| NbExportError::schema(path, "missing or non-numeric `nbformat`"))?;

        let cells = if nbformat >= MODERN_NBFORMAT {
            let nb: ModernNotebook = serde_json::from_value(value)
                .map_err(|e| NbExportError::schema(path, format!("nbformat {nbformat}: {e}")))?;
            nb.cells.into_iter().map(Cell::Modern).collect()
        } else {
            let nb: LegacyNotebook = serde_json::from_value(value)
                .map_err(|e| NbExportError::schema(path, format!("nbformat {nbformat}: {e}")))?;
            let sheet = nb
                .worksheets
                .into_iter()
                .next()
                .ok_or_else(|| NbExportError::schema(path, "`worksheets` is empty"))?;
            sheet
                .cells
                .into_iter()
                .enumerate()
                .map(|(i, raw)| {
                    raw.input
                        .map(|input| Cell::Legacy(LegacyCell { input }))
                        .ok_or_else(|| NbExportError::schema(path, format!("cell {i} has no `input`")))
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            path: path.to_path_buf(),
            nbformat,
            cells,
        })
    }

    /// Whether the notebook uses the v4+ layout.
    pub fn is_modern(&self) -> bool {
        self.nbformat >= MODERN_NBFORMAT
    }
}

/// Read one notebook and feed its cells, in order, into `map`.
///
/// Returns how many cells carried a directive.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_notebook(map: &mut AccumulationMap, path: &Path, add_newline: bool) -> Result<usize> {
    let notebook = Notebook::open(path)?;

    let mut registered = 0;
    for cell in &notebook.cells {
        if map.register(cell.lines(), add_newline) {
            registered += 1;
        }
    }

    debug!(
        nbformat = notebook.nbformat,
        modern = notebook.is_modern(),
        cells = notebook.cells.len(),
        registered,
        "notebook read"
    );

    Ok(registered)
}
