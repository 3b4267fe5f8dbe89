//! High-level pipeline: fetch CSV -> normalize -> build table -> render JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetload::{load_sheet, JsonMode, SheetOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = load_sheet(
//!         "https://docs.google.com/spreadsheets/d/abc123/edit",
//!         &SheetOptions::default(),
//!     ).await?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! Failures are returned as typed [`SheetError`] values rather than folded
//! into the output string, so callers can always tell a JSON payload from a
//! diagnostic.

use serde::{Deserialize, Serialize};

use crate::csv::{build_table, normalize_multiline, TableShape};
use crate::error::{CsvResult, SheetResult};
use crate::fetch::SheetFetcher;
use crate::logs::{log_info, log_success};
use crate::render::render_json;

/// Output shape of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonMode {
    /// No conversion: return the normalized CSV text as-is.
    None,
    /// Each data row becomes one element of a JSON array.
    Array,
    /// Each data row becomes one value in a JSON object, keyed by its first
    /// column.
    Dictionary,
}

/// Options for loading a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetOptions {
    /// Requested output shape
    pub mode: JsonMode,

    /// Accept invalid TLS certificates at the fetch boundary.
    ///
    /// Off by default; only enable for sheets served behind broken proxies.
    pub accept_invalid_certs: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            mode: JsonMode::Array,
            accept_invalid_certs: false,
        }
    }
}

/// Convert CSV export text to JSON without touching the network.
///
/// Runs the full synchronous path: multiline normalization, table building
/// in the requested shape, wrapper-directed rendering. [`JsonMode::None`]
/// returns the normalized text untouched.
pub fn convert_csv(csv: &str, mode: JsonMode) -> CsvResult<String> {
    let normalized = normalize_multiline(csv);
    match mode {
        JsonMode::None => Ok(normalized),
        JsonMode::Array => render_json(&build_table(&normalized, TableShape::Array)?),
        JsonMode::Dictionary => render_json(&build_table(&normalized, TableShape::Dictionary)?),
    }
}

/// Fetch a sheet's CSV export and convert it to JSON.
///
/// This is the main entry point for the pipeline. It:
/// 1. Rewrites the document URL to its CSV export form and downloads it
/// 2. Normalizes multiline quoted fields
/// 3. Builds the table in the requested shape
/// 4. Renders the wrapper-directed JSON
///
/// The fetch is the only suspension point; conversion is pure computation
/// over the downloaded text.
pub async fn load_sheet(url: &str, options: &SheetOptions) -> SheetResult<String> {
    log_info(format!("Fetching sheet: {}", url));
    let fetcher = SheetFetcher::with_invalid_certs(options.accept_invalid_certs)?;
    let csv = fetcher.fetch_csv(url).await?;
    log_success(format!("Fetched {} bytes of CSV", csv.len()));

    let json = convert_csv(&csv, options.mode)?;
    if options.mode != JsonMode::None {
        log_success(format!("Rendered {} bytes of JSON", json.len()));
    }
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;

    const QUOTE_CELL: &str = "\"\"\"\"\"\"";

    #[test]
    fn test_default_options() {
        let opts = SheetOptions::default();
        assert_eq!(opts.mode, JsonMode::Array);
        assert!(!opts.accept_invalid_certs);
    }

    #[test]
    fn test_convert_none_returns_normalized_text() {
        let csv = "a,b\n\"x\ny\",2";
        let out = convert_csv(csv, JsonMode::None).unwrap();
        assert_eq!(out, "a,b\n\"x\\ny\",2");
    }

    #[test]
    fn test_convert_array_end_to_end() {
        let csv = format!("Name,Health,Damage\n{QUOTE_CELL},,\nGoblin,10,3");
        let json = convert_csv(&csv, JsonMode::Array).unwrap();
        assert_eq!(json, r#"[{"Name":"Goblin","Health":10,"Damage":3}]"#);
    }

    #[test]
    fn test_convert_dictionary_end_to_end() {
        let csv = format!("Id,Speed\n{QUOTE_CELL},\nEnemy1,1.5");
        let json = convert_csv(&csv, JsonMode::Dictionary).unwrap();
        assert_eq!(json, r#"{"Enemy1":{"Speed":1.5}}"#);
    }

    #[test]
    fn test_multiline_field_survives_conversion() {
        let csv = format!("Name,Note\n{QUOTE_CELL},{QUOTE_CELL}\nGoblin,\"line one\nline two\"");
        let json = convert_csv(&csv, JsonMode::Array).unwrap();
        assert_eq!(json, "[{\"Name\":\"Goblin\",\"Note\":\"line one\\nline two\"}]");

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["Note"], "line one\nline two");
    }

    #[test]
    fn test_bad_row_dropped_but_rest_converted() {
        let csv = format!("Name,Health\n{QUOTE_CELL},\nGoblin,10\nbroken,1,2,3\nOrc,25");
        let json = convert_csv(&csv, JsonMode::Array).unwrap();
        assert_eq!(json, r#"[{"Name":"Goblin","Health":10},{"Name":"Orc","Health":25}]"#);
    }

    #[test]
    fn test_conversion_error_is_typed() {
        let err = convert_csv("just one line", JsonMode::Array).unwrap_err();
        assert!(matches!(err, CsvError::MissingHeaderRows));
    }
}
