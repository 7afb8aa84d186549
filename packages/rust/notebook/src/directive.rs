//! `# file: <name>` directive parser.
//!
//! Only the first line of a cell is inspected. Accepted forms:
//! - `# file: lib/util.py`
//! - `#   file:   "my file.py"   `
//!
//! The whole line must be the directive; anything trailing the name other
//! than spaces and the newline means "no directive".

use regex::Regex;
use std::sync::LazyLock;

/// Matches a directive line. Group 1 is a quoted name, group 2 a bare name.
///
/// Quoted names cannot contain `"`; there is no escape syntax.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#[ ]+file:[ ]+(?:"([^"]*)"|([^ \n]*))[ \n]*$"#).expect("directive regex")
});

/// Outcome of inspecting a cell's first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marked<'a> {
    /// The cell is destined for `target`; `body` is the cell minus the directive line.
    Directive { target: String, body: &'a [String] },
    /// No directive; the original lines, untouched.
    Plain(&'a [String]),
}

#[cfg(test)]
impl Marked<'_> {
    /// Target file name, if a directive was found.
    fn target(&self) -> Option<&str> {
        match self {
            Marked::Directive { target, .. } => Some(target.as_str()),
            Marked::Plain(_) => None,
        }
    }
}

/// Split a cell into its destination file and body.
///
/// Empty cells and cells whose first line is not exactly a directive come
/// back as [`Marked::Plain`]. An empty name (`# file: ""`) is not a directive.
pub fn parse_directive(lines: &[String]) -> Marked<'_> {
    let Some((first, rest)) = lines.split_first() else {
        return Marked::Plain(lines);
    };

    let target = DIRECTIVE_RE.captures(first).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
            .map(String::from)
    });

    match target {
        Some(target) => Marked::Directive { target, body: rest },
        None => Marked::Plain(lines),
    }
}

/// Loose check for lines that look like a directive but may not parse as one.
pub(crate) fn resembles_directive(line: &str) -> bool {
    line.trim_start().starts_with('#') && line.contains("file:")
}
