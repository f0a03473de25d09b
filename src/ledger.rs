//! Persisted record of where each category was last written.
//!
//! The ledger is the single source of truth for "where was this category
//! last materialized". Only the reconciliation engine mutates it, and it
//! saves through a [`LedgerStore`] immediately after every change.
//!
//! On disk the ledger is a small JSON document:
//!
//! ```json
//! {
//!   "base_dir": "Scripts/Generated/",
//!   "entries": {
//!     "tag": { "path": "/project/Assets/Scripts/Generated/TagName.cs",
//!              "written_at": "2024-05-01T10:00:00Z" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::fs::write_atomic;
use crate::models::Category;

/// Last successful write for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Absolute path of the generated file.
    pub path: PathBuf,
    /// When the file was written.
    pub written_at: DateTime<Utc>,
}

/// Category → last written path, plus the global base directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathLedger {
    base_dir: Option<String>,
    entries: BTreeMap<Category, LedgerEntry>,
}

impl PathLedger {
    /// Last recorded path for `category`, if any.
    pub fn path(&self, category: Category) -> Option<&Path> {
        self.entries.get(&category).map(|e| e.path.as_path())
    }

    pub fn entry(&self, category: Category) -> Option<&LedgerEntry> {
        self.entries.get(&category)
    }

    /// Record a successful write.
    pub fn record(&mut self, category: Category, path: PathBuf) {
        self.entries.insert(
            category,
            LedgerEntry {
                path,
                written_at: Utc::now(),
            },
        );
    }

    /// Forget the path for `category`. Returns whether an entry existed.
    pub fn clear(&mut self, category: Category) -> bool {
        self.entries.remove(&category).is_some()
    }

    pub fn base_dir(&self) -> Option<&str> {
        self.base_dir.as_deref()
    }

    pub fn set_base_dir(&mut self, base_dir: impl Into<String>) {
        self.base_dir = Some(base_dir.into());
    }

    /// Iterate recorded entries in category order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &LedgerEntry)> {
        self.entries.iter().map(|(c, e)| (*c, e))
    }
}

/// Serialized form, keyed by category name so unknown keys survive parsing.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_dir: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, LedgerEntry>,
}

impl From<LedgerFile> for PathLedger {
    fn from(file: LedgerFile) -> Self {
        let mut entries = BTreeMap::new();
        for (key, entry) in file.entries {
            match key.parse::<Category>() {
                Ok(category) => {
                    entries.insert(category, entry);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Dropping ledger entry");
                }
            }
        }
        Self {
            base_dir: file.base_dir,
            entries,
        }
    }
}

impl From<&PathLedger> for LedgerFile {
    fn from(ledger: &PathLedger) -> Self {
        Self {
            base_dir: ledger.base_dir.clone(),
            entries: ledger
                .entries
                .iter()
                .map(|(c, e)| (c.key().to_string(), e.clone()))
                .collect(),
        }
    }
}

/// Durable storage for the ledger.
pub trait LedgerStore {
    /// Load the ledger, or an empty one if nothing was saved yet.
    fn load(&self) -> Result<PathLedger, AppError>;

    /// Persist the ledger.
    fn save(&mut self, ledger: &PathLedger) -> Result<(), AppError>;
}

/// Ledger stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> Result<PathLedger, AppError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No ledger file, starting empty");
                return Ok(PathLedger::default());
            }
            Err(e) => return Err(AppError::io(&self.path, e)),
        };

        let file: LedgerFile =
            serde_json::from_str(&content).map_err(|source| AppError::Ledger {
                path: self.path.clone(),
                source,
            })?;
        Ok(file.into())
    }

    fn save(&mut self, ledger: &PathLedger) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&LedgerFile::from(ledger)).map_err(|source| {
            AppError::Ledger {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "Saved ledger");
        Ok(())
    }
}

/// In-memory store, for embedding hosts that persist elsewhere and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    ledger: PathLedger,
    saves: usize,
}

impl MemoryLedgerStore {
    pub fn new(ledger: PathLedger) -> Self {
        Self { ledger, saves: 0 }
    }

    /// Most recently saved ledger.
    pub fn ledger(&self) -> &PathLedger {
        &self.ledger
    }

    /// Number of saves performed.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<PathLedger, AppError> {
        Ok(self.ledger.clone())
    }

    fn save(&mut self, ledger: &PathLedger) -> Result<(), AppError> {
        self.ledger = ledger.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut ledger = PathLedger::default();
        assert_eq!(ledger.path(Category::Tag), None);

        ledger.record(Category::Tag, PathBuf::from("/p/Assets/Gen/TagName.cs"));
        assert_eq!(
            ledger.path(Category::Tag),
            Some(Path::new("/p/Assets/Gen/TagName.cs"))
        );

        assert!(ledger.clear(Category::Tag));
        assert!(!ledger.clear(Category::Tag));
        assert_eq!(ledger.path(Category::Tag), None);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("ledger.json"));
        assert_eq!(store.load().unwrap(), PathLedger::default());
    }

    #[test]
    fn test_json_store_persists_entries_and_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonLedgerStore::new(dir.path().join(".enumgen").join("ledger.json"));

        let mut ledger = PathLedger::default();
        ledger.set_base_dir("Gen/");
        ledger.record(Category::SortingLayer, PathBuf::from("/p/Gen/SortingLayerName.cs"));
        store.save(&ledger).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"sorting_layer\""));

        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_json_store_drops_unknown_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{
                "entries": {
                    "tag": { "path": "/p/TagName.cs", "written_at": "2024-05-01T10:00:00Z" },
                    "material": { "path": "/p/MaterialName.cs", "written_at": "2024-05-01T10:00:00Z" }
                }
            }"#,
        )
        .unwrap();

        let ledger = JsonLedgerStore::new(&path).load().unwrap();
        assert_eq!(ledger.entries().count(), 1);
        assert_eq!(ledger.path(Category::Tag), Some(Path::new("/p/TagName.cs")));
        assert_eq!(ledger.base_dir(), None);
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonLedgerStore::new(&path).load().unwrap_err();
        assert_eq!(err.code(), "LEDGER_ERROR");
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryLedgerStore::default();
        let mut ledger = PathLedger::default();
        ledger.set_base_dir("Gen/");
        store.save(&ledger).unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.ledger().base_dir(), Some("Gen/"));
    }
}
