//! Error types for the sheetload conversion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - table shape and wrap-directive errors
//! - [`FetchError`] - spreadsheet download errors
//! - [`RegistryError`] - sheet registry errors
//! - [`SheetError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Conversion Errors
// =============================================================================

/// Errors during CSV table building and JSON rendering.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The table has no room for both a header row and a wrapper row.
    #[error("Invalid header data: first line should contain field names, second line wrap directives")]
    MissingHeaderRows,

    /// A wrapper row cell is not one of the allowed wrap directives.
    #[error("Invalid wrap directive for \"{column}\" field")]
    InvalidDirective { column: String },

    /// In dictionary mode the key column must carry the quote directive.
    #[error("Invalid wrap directive for key column \"{column}\": it must be \"\"")]
    KeyDirective { column: String },
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors while downloading a spreadsheet as CSV.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No URL was provided.
    #[error("No spreadsheet URL provided")]
    MissingUrl,

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The request itself failed; wraps the requested URL for context.
    #[error("\"{url}\": {message}")]
    Request { url: String, message: String },

    /// The response body could not be decoded to text.
    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors from the sheet registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Sheet id not found.
    #[error("Sheet not found: {0}")]
    NotFound(String),

    /// A sheet with this id is already registered.
    #[error("Sheet already registered: {0}")]
    Duplicate(String),

    /// IO error.
    #[error("Registry IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Registry JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Sheet Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::load_sheet`].
/// It wraps all lower-level errors and adds the deserialization variant used
/// by the typed record loaders.
#[derive(Debug, Error)]
pub enum SheetError {
    /// CSV conversion error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Download error.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Registry error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Deserialization of the rendered JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV conversion operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for pipeline operations.
pub type SheetResult<T> = Result<T, SheetError>;
