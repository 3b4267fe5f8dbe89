//! # Sheetload - Google Sheets CSV exports as JSON
//!
//! Sheetload downloads a spreadsheet's CSV export and transcodes it into
//! JSON, driven by a second header row of per-column *wrap directives*
//! (quote, array/object fragment, raw literal, or ignore).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Sheet URL  │────▶│    Fetch    │────▶│  Normalize  │────▶│ Table build │
//! │   (/edit)   │     │ (csv export)│     │ (multiline) │     │  + render   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheetload::{load_sheet, SheetOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let json = load_sheet("https://docs.google.com/spreadsheets/d/abc/edit",
//!                           &SheetOptions::default()).await.unwrap();
//!     println!("{}", json);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`csv`] - Multiline normalization, line tokenization, table building
//! - [`render`] - Wrapper-directed JSON rendering
//! - [`fetch`] - Spreadsheet download boundary
//! - [`pipeline`] - End-to-end orchestration
//! - [`records`] - Typed deserialization helpers
//! - [`registry`] - Sheet id to URL registry
//! - [`logs`] - Pipeline log channel

// Core modules
pub mod error;
pub mod logs;

// CSV handling
pub mod csv;

// Rendering
pub mod render;

// Fetching
pub mod fetch;

// Registry
pub mod registry;

// Typed records
pub mod records;

// Pipeline
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult, FetchError, FetchResult, RegistryError, RegistryResult, SheetError,
    SheetResult,
};

// =============================================================================
// Re-exports - CSV handling
// =============================================================================

pub use csv::{build_table, normalize_multiline, tokenize_line, KeyedRows, Table, TableShape};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use render::{render_json, WrapDirective};

// =============================================================================
// Re-exports - Fetch
// =============================================================================

pub use fetch::{export_url, SheetFetcher};

// =============================================================================
// Re-exports - Registry
// =============================================================================

pub use registry::{SheetRegistry, StoredSheet};

// =============================================================================
// Re-exports - Typed records
// =============================================================================

pub use records::{read_array, read_by_id, read_dictionary};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{convert_csv, load_sheet, JsonMode, SheetOptions};
