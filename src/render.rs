//! Wrapper-directed JSON rendering.
//!
//! The second table row holds one *wrap directive* per column, telling the
//! renderer how to frame that column's raw text as a JSON value:
//!
//! | Directive  | Meaning                                             |
//! |------------|-----------------------------------------------------|
//! | empty cell | value is a ready-made JSON literal, emitted verbatim |
//! | `[]`       | value framed as `[` ... `]`                          |
//! | `{}`       | value framed as `{` ... `}`                          |
//! | `""`       | value framed as a JSON string                        |
//! | `IGNORE`   | column omitted from output (case-insensitive)        |
//!
//! Directives are matched against the *decoded* cell text, so a sheet cell
//! containing `""` (which a CSV export writes as `""""""`) selects the quote
//! directive.
//!
//! Output is built as a plain string. Raw-directive columns are emitted
//! unescaped and unquoted; callers must guarantee those cells already hold
//! valid JSON literals (numbers, `true`/`false`/`null`, nested fragments).

use crate::csv::table::{KeyedRows, Table};
use crate::error::{CsvError, CsvResult};

/// Per-column wrap directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapDirective {
    /// Empty cell: emit the value verbatim as a pre-formed JSON literal.
    Raw,
    /// `[]`: frame the value in square brackets.
    Array,
    /// `{}`: frame the value in curly braces.
    Object,
    /// `""`: frame the value in double quotes.
    Quote,
    /// `IGNORE`: omit the column entirely.
    Ignore,
}

impl WrapDirective {
    /// Parse a decoded wrapper cell. Returns `None` for unknown tokens.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "" => Some(Self::Raw),
            "[]" => Some(Self::Array),
            "{}" => Some(Self::Object),
            "\"\"" => Some(Self::Quote),
            t if t.eq_ignore_ascii_case("IGNORE") => Some(Self::Ignore),
            _ => None,
        }
    }

    /// Prefix and suffix framing the value. Empty for [`Self::Raw`].
    fn affixes(self) -> (&'static str, &'static str) {
        match self {
            Self::Raw | Self::Ignore => ("", ""),
            Self::Array => ("[", "]"),
            Self::Object => ("{", "}"),
            Self::Quote => ("\"", "\""),
        }
    }
}

/// Validate one wrapper row against its header names.
fn parse_directives(names: &[String], tokens: &[String]) -> CsvResult<Vec<WrapDirective>> {
    names
        .iter()
        .zip(tokens)
        .map(|(name, token)| {
            WrapDirective::parse(token).ok_or_else(|| CsvError::InvalidDirective {
                column: name.clone(),
            })
        })
        .collect()
}

/// Render a table to a JSON string.
///
/// Array tables become a JSON array of objects, keyed tables a JSON object
/// of objects. Field order mirrors header order minus ignored columns. A
/// table with no data rows still renders a valid empty `[]` / `{}`.
pub fn render_json(table: &Table) -> CsvResult<String> {
    match table {
        Table::Rows(rows) => render_array(rows),
        Table::Keyed(keyed) => render_dictionary(keyed),
    }
}

fn render_array(rows: &[Vec<String>]) -> CsvResult<String> {
    let (header, wrapper, data) = match rows {
        [header, wrapper, data @ ..] => (header, wrapper, data),
        _ => return Err(CsvError::MissingHeaderRows),
    };
    let directives = parse_directives(header, wrapper)?;

    let mut out = String::with_capacity(estimate_capacity(rows));
    out.push('[');
    let mut need_object_comma = false;
    for row in data {
        if need_object_comma {
            out.push(',');
        }
        out.push('{');
        push_record(&mut out, header, &directives, row);
        out.push('}');
        need_object_comma = true;
    }
    out.push(']');
    Ok(out)
}

fn render_dictionary(keyed: &KeyedRows) -> CsvResult<String> {
    let mut entries = keyed.iter();
    let (header_key, header) = entries.next().ok_or(CsvError::MissingHeaderRows)?;
    let (wrapper_key, wrapper) = entries.next().ok_or(CsvError::MissingHeaderRows)?;

    // The key column must be declared as a JSON string. The renderer quotes
    // the key unconditionally either way; this is a declared-type check.
    if wrapper_key != "\"\"" {
        return Err(CsvError::KeyDirective {
            column: header_key.clone(),
        });
    }
    let directives = parse_directives(header, wrapper)?;

    let mut out = String::with_capacity(estimate_keyed_capacity(keyed));
    out.push('{');
    let mut need_object_comma = false;
    for (key, row) in entries {
        if need_object_comma {
            out.push(',');
        }
        out.push('"');
        out.push_str(key);
        out.push_str("\":{");
        push_record(&mut out, header, &directives, row);
        out.push('}');
        need_object_comma = true;
    }
    out.push('}');
    Ok(out)
}

/// Emit `"name":wrapped` pairs for one record, comma-separated, skipping
/// ignored columns.
fn push_record(out: &mut String, header: &[String], directives: &[WrapDirective], row: &[String]) {
    let mut need_field_comma = false;
    for (i, name) in header.iter().enumerate() {
        let directive = directives[i];
        if directive == WrapDirective::Ignore {
            continue;
        }
        if need_field_comma {
            out.push(',');
        }
        let (prefix, suffix) = directive.affixes();
        out.push('"');
        out.push_str(name);
        out.push_str("\":");
        out.push_str(prefix);
        out.push_str(&row[i]);
        out.push_str(suffix);
        need_field_comma = true;
    }
}

fn estimate_capacity(rows: &[Vec<String>]) -> usize {
    let chars: usize = rows
        .iter()
        .map(|r| r.iter().map(String::len).sum::<usize>())
        .sum();
    chars * 2
}

fn estimate_keyed_capacity(keyed: &KeyedRows) -> usize {
    let chars: usize = keyed
        .iter()
        .map(|(k, r)| k.len() + r.iter().map(String::len).sum::<usize>())
        .sum();
    chars * 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::table::{build_table, TableShape};

    fn table(csv: &str, shape: TableShape) -> Table {
        build_table(csv, shape).unwrap()
    }

    // Six quotes is how a CSV export writes a cell containing "".
    const QUOTE_CELL: &str = "\"\"\"\"\"\"";

    #[test]
    fn test_array_example() {
        let csv = format!("Name,Health,Damage\n{QUOTE_CELL},,\nGoblin,10,3");
        let json = render_json(&table(&csv, TableShape::Array)).unwrap();
        assert_eq!(json, r#"[{"Name":"Goblin","Health":10,"Damage":3}]"#);
    }

    #[test]
    fn test_dictionary_example() {
        let csv = format!("Id,Speed\n{QUOTE_CELL},\nEnemy1,1.5");
        let json = render_json(&table(&csv, TableShape::Dictionary)).unwrap();
        assert_eq!(json, r#"{"Enemy1":{"Speed":1.5}}"#);
    }

    #[test]
    fn test_invalid_directive_names_column() {
        let csv = format!("Name,Health\n{QUOTE_CELL},xyz\nGoblin,10");
        let err = render_json(&table(&csv, TableShape::Array)).unwrap_err();
        match err {
            CsvError::InvalidDirective { column } => assert_eq!(column, "Health"),
            other => panic!("expected directive error, got {other:?}"),
        }
    }

    #[test]
    fn test_dictionary_key_column_must_be_quote() {
        let csv = "Id,Speed\n[],\nEnemy1,1.5";
        let err = render_json(&table(csv, TableShape::Dictionary)).unwrap_err();
        match err {
            CsvError::KeyDirective { column } => assert_eq!(column, "Id"),
            other => panic!("expected key directive error, got {other:?}"),
        }
    }

    #[test]
    fn test_ignore_column_omitted() {
        let csv = format!("Name,Secret,Damage\n{QUOTE_CELL},ignore,\nGoblin,hidden,3");
        let json = render_json(&table(&csv, TableShape::Array)).unwrap();
        assert_eq!(json, r#"[{"Name":"Goblin","Damage":3}]"#);
        assert!(!json.contains("Secret"));
        assert!(!json.contains("hidden"));
    }

    #[test]
    fn test_array_and_object_directives_frame_fragments() {
        let csv = "Id,Tags,Stats\n".to_string()
            + &format!("{QUOTE_CELL},[],{{}}\n")
            + "Enemy1,\"1,2,3\",\"\"\"hp\"\":10\"";
        let json = render_json(&table(&csv, TableShape::Dictionary)).unwrap();
        assert_eq!(json, r#"{"Enemy1":{"Tags":[1,2,3],"Stats":{"hp":10}}}"#);
    }

    #[test]
    fn test_raw_directive_emits_bare_literal() {
        let csv = "N,V\n,\n1,42\n2,true\n3,null";
        let json = render_json(&table(csv, TableShape::Array)).unwrap();
        assert_eq!(json, r#"[{"N":1,"V":42},{"N":2,"V":true},{"N":3,"V":null}]"#);
    }

    #[test]
    fn test_zero_data_rows_render_empty_roots() {
        let csv = format!("Name,Health\n{QUOTE_CELL},");
        let json = render_json(&table(&csv, TableShape::Array)).unwrap();
        assert_eq!(json, "[]");

        let csv = format!("Id,Speed\n{QUOTE_CELL},");
        let json = render_json(&table(&csv, TableShape::Dictionary)).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_rendered_output_parses_as_json() {
        let csv = format!(
            "Name,Health,Damage,Note\n{QUOTE_CELL},,,{QUOTE_CELL}\nGoblin,10,3,weak\nOrc,25,7,strong"
        );
        let json = render_json(&table(&csv, TableShape::Array)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["Note"], "strong");
        assert_eq!(value[0]["Health"], 10);
    }

    #[test]
    fn test_directive_parsing() {
        assert_eq!(WrapDirective::parse(""), Some(WrapDirective::Raw));
        assert_eq!(WrapDirective::parse("[]"), Some(WrapDirective::Array));
        assert_eq!(WrapDirective::parse("{}"), Some(WrapDirective::Object));
        assert_eq!(WrapDirective::parse("\"\""), Some(WrapDirective::Quote));
        assert_eq!(WrapDirective::parse("IGNORE"), Some(WrapDirective::Ignore));
        assert_eq!(WrapDirective::parse("Ignore"), Some(WrapDirective::Ignore));
        assert_eq!(WrapDirective::parse("xyz"), None);
        assert_eq!(WrapDirective::parse("[ ]"), None);
    }
}
