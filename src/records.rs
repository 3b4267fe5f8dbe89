//! Typed record loading.
//!
//! Thin serde glue over the pipeline: fetch a sheet, render it to JSON,
//! deserialize into caller-supplied record types.

use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::SheetResult;
use crate::pipeline::{load_sheet, JsonMode, SheetOptions};
use crate::registry::SheetRegistry;

/// Load a sheet in array mode and deserialize each record.
pub async fn read_array<T: DeserializeOwned>(url: &str) -> SheetResult<Vec<T>> {
    let options = SheetOptions {
        mode: JsonMode::Array,
        ..SheetOptions::default()
    };
    let json = load_sheet(url, &options).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Load a sheet in dictionary mode and deserialize each record, keyed by the
/// sheet's first column.
pub async fn read_dictionary<T: DeserializeOwned>(url: &str) -> SheetResult<HashMap<String, T>> {
    let options = SheetOptions {
        mode: JsonMode::Dictionary,
        ..SheetOptions::default()
    };
    let json = load_sheet(url, &options).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Resolve a registered sheet id and load its records in array mode.
///
/// Updates the registry's usage statistics on success.
pub async fn read_by_id<T: DeserializeOwned>(
    registry: &mut SheetRegistry,
    id: &str,
) -> SheetResult<Vec<T>> {
    let url = registry.url_for(id)?;
    let records = read_array(&url).await?;
    registry.touch(id);
    Ok(records)
}
