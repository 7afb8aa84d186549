//! Notebook reading and cell accumulation for nbexport.
//!
//! A notebook cell whose first line is a `# file: <name>` directive is
//! routed to the output file `<name>`; every other cell is ignored.
//! - [`directive`] — recognizes the directive line
//! - [`accumulator`] — collects cell bodies per output file, in order
//! - [`document`] — loads `.ipynb` files in both the v4+ and legacy layouts

pub mod accumulator;
pub mod directive;
pub mod document;

pub use accumulator::AccumulationMap;
pub use directive::{Marked, parse_directive};
pub use document::{Cell, LegacyCell, ModernCell, Notebook, read_notebook};
