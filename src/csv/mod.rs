//! CSV handling: multiline normalization, line tokenization, table building.
//!
//! The input is a spreadsheet CSV export: row 1 holds column names, row 2
//! holds per-column wrap directives, rows 3+ hold data. These modules turn
//! raw export text into a [`Table`] that the renderer consumes.

pub mod normalize;
pub mod table;
pub mod tokenize;

pub use normalize::normalize_multiline;
pub use table::{build_table, KeyedRows, Table, TableShape};
pub use tokenize::tokenize_line;
