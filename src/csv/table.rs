//! Table building.
//!
//! Consumes normalized CSV text line by line and assembles the tabular
//! structure the renderer works on. The first retained row fixes the column
//! count; rows with a different field count are dropped with a warning and
//! processing continues.

use std::collections::HashMap;

use crate::csv::tokenize::split_into;
use crate::error::{CsvError, CsvResult};
use crate::logs::log_warning;

/// Target shape for a built table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Rows kept in encounter order.
    Array,
    /// Rows keyed by their first column.
    Dictionary,
}

/// A parsed spreadsheet table: header row + wrapper row + data rows.
#[derive(Debug, Clone)]
pub enum Table {
    /// Array mode: every retained row in encounter order, full field sequence.
    Rows(Vec<Vec<String>>),
    /// Dictionary mode: rows keyed by their first column, key excluded from
    /// the stored fields.
    Keyed(KeyedRows),
}

/// Order-preserving key-to-row store.
///
/// Plain map semantics would lose row order, so entries live in a `Vec` with
/// a key index on the side. A duplicate key overwrites the stored fields in
/// place: last write wins on the value, first write wins on the position.
#[derive(Debug, Clone, Default)]
pub struct KeyedRows {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl KeyedRows {
    fn insert(&mut self, key: String, fields: Vec<String>) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = fields,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, fields));
            }
        }
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Vec<String>)> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a [`Table`] from normalized CSV text.
///
/// Blank lines are skipped. In dictionary mode a line whose first field is
/// empty is skipped as well, since it cannot be keyed. At least two rows must
/// survive (header + wrapper) or [`CsvError::MissingHeaderRows`] is returned.
pub fn build_table(csv: &str, shape: TableShape) -> CsvResult<Table> {
    let mut fields: Vec<String> = Vec::new();
    let mut header_len: Option<usize> = None;

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut keyed = KeyedRows::default();

    for (line_no, line) in csv.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        split_into(line, &mut fields);

        if shape == TableShape::Dictionary && fields[0].is_empty() {
            continue;
        }

        let expected = *header_len.get_or_insert(fields.len());
        if fields.len() != expected {
            log_warning(format!(
                "Skipping line {}: {} fields, expected {}",
                line_no + 1,
                fields.len(),
                expected
            ));
            continue;
        }

        match shape {
            TableShape::Array => rows.push(std::mem::take(&mut fields)),
            TableShape::Dictionary => {
                let mut row = std::mem::take(&mut fields);
                let key = row.remove(0);
                keyed.insert(key, row);
            }
        }
    }

    let retained = match shape {
        TableShape::Array => rows.len(),
        TableShape::Dictionary => keyed.len(),
    };
    if retained < 2 {
        return Err(CsvError::MissingHeaderRows);
    }

    Ok(match shape {
        TableShape::Array => Table::Rows(rows),
        TableShape::Dictionary => Table::Keyed(keyed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(table: Table) -> Vec<Vec<String>> {
        match table {
            Table::Rows(r) => r,
            Table::Keyed(_) => panic!("expected array table"),
        }
    }

    fn keyed(table: Table) -> KeyedRows {
        match table {
            Table::Keyed(k) => k,
            Table::Rows(_) => panic!("expected keyed table"),
        }
    }

    #[test]
    fn test_array_mode_preserves_order() {
        let csv = "Name,Health\n\"\"\"\"\"\",\nGoblin,10\nOrc,25";
        let r = rows(build_table(csv, TableShape::Array).unwrap());
        assert_eq!(r.len(), 4);
        assert_eq!(r[0], vec!["Name", "Health"]);
        assert_eq!(r[2], vec!["Goblin", "10"]);
        assert_eq!(r[3], vec!["Orc", "25"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "a,b\n\n1,2\n   \n3,4";
        let r = rows(build_table(csv, TableShape::Array).unwrap());
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_mismatched_row_dropped_not_fatal() {
        let csv = "a,b\nc,d\n1,2,3\n4,5";
        let r = rows(build_table(csv, TableShape::Array).unwrap());
        assert_eq!(r.len(), 3);
        assert_eq!(r[2], vec!["4", "5"]);
    }

    #[test]
    fn test_too_few_rows_is_shape_error() {
        let err = build_table("only,one,line", TableShape::Array).unwrap_err();
        assert!(matches!(err, CsvError::MissingHeaderRows));

        let err = build_table("", TableShape::Array).unwrap_err();
        assert!(matches!(err, CsvError::MissingHeaderRows));
    }

    #[test]
    fn test_dictionary_mode_splits_key_from_fields() {
        let csv = "Id,Speed\n\"\"\"\"\"\",\nEnemy1,1.5";
        let k = keyed(build_table(csv, TableShape::Dictionary).unwrap());
        assert_eq!(k.len(), 3);

        let entries: Vec<_> = k.iter().collect();
        assert_eq!(entries[0].0, "Id");
        assert_eq!(entries[0].1, vec!["Speed"]);
        assert_eq!(entries[1].0, "\"\"");
        assert_eq!(entries[2].0, "Enemy1");
        assert_eq!(entries[2].1, vec!["1.5"]);
    }

    #[test]
    fn test_dictionary_blank_key_skipped() {
        let csv = "Id,Speed\n\"\"\"\"\"\",\n,9.9\nEnemy1,1.5";
        let k = keyed(build_table(csv, TableShape::Dictionary).unwrap());
        assert_eq!(k.len(), 3);
        assert!(k.get("Enemy1").is_some());
    }

    #[test]
    fn test_dictionary_duplicate_key_last_write_wins() {
        let csv = "Id,Speed\n\"\"\"\"\"\",\nEnemy1,1.5\nEnemy2,2.0\nEnemy1,9.0";
        let k = keyed(build_table(csv, TableShape::Dictionary).unwrap());
        assert_eq!(k.len(), 4);
        assert_eq!(k.get("Enemy1").unwrap(), ["9.0"]);

        // First-insertion position is kept
        let order: Vec<_> = k.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(order, vec!["Id", "\"\"", "Enemy1", "Enemy2"]);
    }

    #[test]
    fn test_quoted_comma_keeps_column_count() {
        let csv = "a,b\n1,2\n\"x,y\",3";
        let r = rows(build_table(csv, TableShape::Array).unwrap());
        assert_eq!(r[2], vec!["x,y", "3"]);
    }
}
