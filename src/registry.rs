//! Sheet registry - store spreadsheet URLs under short ids.
//!
//! Saves one JSON file per registered sheet so callers can load sheets by
//! name instead of pasting document URLs around.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, RegistryResult};

/// Directory where sheets are stored (relative to current dir)
const DEFAULT_REGISTRY_DIR: &str = ".sheetload/sheets";

/// Environment variable overriding the registry directory.
const REGISTRY_DIR_ENV: &str = "SHEETLOAD_REGISTRY_DIR";

/// A registered sheet with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSheet {
    /// Short identifier chosen by the user
    pub id: String,
    /// Spreadsheet document URL
    pub url: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last time this sheet was loaded
    pub last_used: Option<String>,
    /// Number of times loaded
    pub use_count: u32,
}

/// Registry for managing sheet URLs
pub struct SheetRegistry {
    /// Directory where sheets are stored
    registry_dir: PathBuf,
    /// Loaded sheets (id -> sheet)
    sheets: HashMap<String, StoredSheet>,
}

impl SheetRegistry {
    /// Create a new registry, loading existing sheets from disk.
    ///
    /// The directory defaults to `.sheetload/sheets` and can be overridden
    /// with the `SHEETLOAD_REGISTRY_DIR` environment variable.
    pub fn new() -> Self {
        let dir = env::var(REGISTRY_DIR_ENV).unwrap_or_else(|_| DEFAULT_REGISTRY_DIR.to_string());
        Self::with_dir(dir)
    }

    /// Create a registry with a custom directory
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let registry_dir = PathBuf::from(dir.as_ref());
        let mut registry = Self {
            registry_dir,
            sheets: HashMap::new(),
        };
        registry.load_all();
        registry
    }

    /// Load all sheets from the registry directory
    fn load_all(&mut self) {
        if !self.registry_dir.exists() {
            return;
        }

        let entries = match fs::read_dir(&self.registry_dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(sheet) = serde_json::from_str::<StoredSheet>(&content) {
                        self.sheets.insert(sheet.id.clone(), sheet);
                    }
                }
            }
        }
    }

    /// Get all registered sheets
    pub fn list(&self) -> Vec<&StoredSheet> {
        self.sheets.values().collect()
    }

    /// Get a sheet by id
    pub fn get(&self, id: &str) -> Option<&StoredSheet> {
        self.sheets.get(id)
    }

    /// Resolve an id to its URL, or [`RegistryError::NotFound`].
    pub fn url_for(&self, id: &str) -> RegistryResult<String> {
        self.sheets
            .get(id)
            .map(|s| s.url.clone())
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Register a new sheet URL under `id`
    pub fn add(&mut self, id: &str, url: &str) -> RegistryResult<()> {
        if self.sheets.contains_key(id) {
            return Err(RegistryError::Duplicate(id.to_string()));
        }

        // Ensure directory exists
        fs::create_dir_all(&self.registry_dir)?;

        let sheet = StoredSheet {
            id: id.to_string(),
            url: url.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            last_used: None,
            use_count: 0,
        };

        let path = self.file_path(id);
        let content = serde_json::to_string_pretty(&sheet)?;
        fs::write(&path, content)?;

        self.sheets.insert(id.to_string(), sheet);
        Ok(())
    }

    /// Update statistics after loading a sheet
    pub fn touch(&mut self, id: &str) {
        let path = self.file_path(id);
        if let Some(sheet) = self.sheets.get_mut(id) {
            sheet.last_used = Some(chrono::Utc::now().to_rfc3339());
            sheet.use_count += 1;

            if let Ok(content) = serde_json::to_string_pretty(sheet) {
                let _ = fs::write(&path, content);
            }
        }
    }

    /// Remove a sheet from the registry
    pub fn remove(&mut self, id: &str) -> RegistryResult<()> {
        if self.sheets.remove(id).is_some() {
            fs::remove_file(self.file_path(id))?;
            Ok(())
        } else {
            Err(RegistryError::NotFound(id.to_string()))
        }
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.registry_dir.join(format!("{}.json", slug(id)))
    }
}

impl Default for SheetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn an id into a safe file stem
fn slug(id: &str) -> String {
    id.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
