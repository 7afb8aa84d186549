//! Per-file accumulation of directed cell bodies.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::directive::{Marked, parse_directive, resembles_directive};

/// Output file name → pending lines, in arrival order.
///
/// One map lives for a whole export run and is threaded through every
/// notebook read, so cells aimed at the same file from different notebooks
/// end up in one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulationMap {
    files: BTreeMap<String, Vec<String>>,
}

impl AccumulationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one cell into the map.
    ///
    /// Cells without a directive are dropped and `false` is returned.
    /// Otherwise the body is appended after whatever the target already
    /// holds, followed by a single `"\n"` line when `add_newline` is set.
    pub fn register(&mut self, cell_lines: &[String], add_newline: bool) -> bool {
        match parse_directive(cell_lines) {
            Marked::Plain(lines) => {
                if let Some(first) = lines.first().filter(|l| resembles_directive(l)) {
                    debug!(line = %first.trim_end(), "cell skipped: first line is not a valid directive");
                }
                false
            }
            Marked::Directive { target, body } => {
                trace!(file = %target, lines = body.len(), "registering cell");
                let entry = self.files.entry(target).or_default();
                entry.extend_from_slice(body);
                if add_newline {
                    entry.push("\n".to_string());
                }
                true
            }
        }
    }

    /// Lines accumulated for `target`.
    pub fn get(&self, target: &str) -> Option<&[String]> {
        self.files.get(target).map(Vec::as_slice)
    }

    /// Accumulated content for `target`, joined exactly as it will be written.
    pub fn content(&self, target: &str) -> Option<String> {
        self.files.get(target).map(|lines| lines.concat())
    }

    /// Number of distinct output files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Output file names.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// `(target, lines)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn interleaved_targets_keep_order() {
        let mut map = AccumulationMap::new();
        assert!(map.register(&cell(&["# file: a.py\n", "one = 1\n"]), true));
        assert!(map.register(&cell(&["# file: b.py\n", "two = 2\n"]), true));
        assert!(map.register(&cell(&["# file: a.py\n", "three = 3\n"]), true));

        assert_eq!(map.content("a.py").unwrap(), "one = 1\n\nthree = 3\n\n");
        assert_eq!(map.content("b.py").unwrap(), "two = 2\n\n");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn without_separator() {
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: a.py\n", "one = 1\n"]), false);
        map.register(&cell(&["# file: a.py\n", "two = 2\n"]), false);

        assert_eq!(
            map.get("a.py").unwrap(),
            &["one = 1\n".to_string(), "two = 2\n".to_string()]
        );
    }

    #[test]
    fn plain_cells_leave_map_untouched() {
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: a.py\n", "x = 1\n"]), true);
        let before = map.clone();

        assert!(!map.register(&cell(&["print('hello')\n"]), true));
        assert!(!map.register(&cell(&["#file: a.py\n", "lost = True\n"]), true));
        assert!(!map.register(&[], true));

        assert_eq!(map, before);
    }

    #[test]
    fn directive_only_cell_creates_entry() {
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: out.py"]), false);

        assert_eq!(map.get("out.py").map(<[String]>::len), Some(0));
        assert_eq!(map.content("out.py").unwrap(), "");
    }

    #[test]
    fn directive_only_cell_with_separator() {
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: out.py"]), true);

        assert_eq!(map.content("out.py").unwrap(), "\n");
    }

    #[test]
    fn targets_are_not_normalized() {
        let mut map = AccumulationMap::new();
        map.register(&cell(&["# file: lib.py\n", "a\n"]), false);
        map.register(&cell(&["# file: Lib.py\n", "b\n"]), false);
        map.register(&cell(&["# file: \"lib.py \"\n", "c\n"]), false);

        let targets: Vec<&str> = map.targets().collect();
        assert_eq!(targets, vec!["Lib.py", "lib.py", "lib.py "]);
    }
}
