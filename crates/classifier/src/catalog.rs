//! Catalog stores
//!
//! The catalog file is a JSON object mapping model keys to product records:
//!
//! ```json
//! { "GA-2100-1A1": { "name": "CASIO GA-2100-1A1", "brand": "CASIO", "olcu": "45 x 48 mm" } }
//! ```
//!
//! Lookups compare compact keys (uppercase, alphanumerics only), then fall
//! back to prefix containment in either direction so that a catalog entry
//! for `GA-B2100` also answers `GA-B2100-1A1`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

use watch_catalog_core::{compact_key, CatalogRecord, CatalogStore};

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
}

/// Exact key, then equal compact keys, then prefix containment.
///
/// Each step takes the first hit in sorted key order, not file order, so
/// overlapping prefixes (`GA-B2100` and `GA-B2100-1`) resolve to the
/// lexicographically smallest key regardless of how the file lists them.
fn lookup_in(records: &BTreeMap<String, CatalogRecord>, model: &str) -> Option<CatalogRecord> {
    let key = compact_key(model);
    if key.is_empty() {
        return None;
    }

    if let Some(record) = records.get(&key) {
        return Some(record.clone());
    }

    if let Some(record) = records
        .iter()
        .find(|(k, _)| compact_key(k) == key)
        .map(|(_, r)| r)
    {
        return Some(record.clone());
    }

    records
        .iter()
        .find(|(k, _)| {
            let ck = compact_key(k);
            !ck.is_empty() && (key.starts_with(&ck) || ck.starts_with(&key))
        })
        .map(|(_, r)| r.clone())
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    records: BTreeMap<String, CatalogRecord>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, CatalogRecord)>,
        K: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, record: CatalogRecord) {
        self.records.insert(key.into(), record);
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn lookup(&self, model: &str) -> Option<CatalogRecord> {
        lookup_in(&self.records, model)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Catalog backed by a JSON file, loaded once and reloadable
#[derive(Debug)]
pub struct JsonCatalogStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, CatalogRecord>>,
}

impl JsonCatalogStore {
    /// Load the catalog file, failing if it cannot be read or is not a JSON object
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let records = read_catalog(&path)?;
        tracing::info!(path = %path.display(), records = records.len(), "Catalog loaded");
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Load the catalog file, or start empty when it is missing or malformed
    pub fn open_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unavailable, continuing with an empty catalog");
                Self {
                    path,
                    records: RwLock::new(BTreeMap::new()),
                }
            }
        }
    }

    /// Re-read the catalog file, keeping the current records on failure
    pub fn reload(&self) -> Result<usize, CatalogError> {
        let records = read_catalog(&self.path)?;
        let count = records.len();
        *self.records.write() = records;
        tracing::info!(path = %self.path.display(), records = count, "Catalog reloaded");
        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonCatalogStore {
    fn lookup(&self, model: &str) -> Option<CatalogRecord> {
        lookup_in(&self.records.read(), model)
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

fn read_catalog(path: &Path) -> Result<BTreeMap<String, CatalogRecord>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let entries: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut records = BTreeMap::new();
    for (key, value) in entries {
        match serde_json::from_value::<CatalogRecord>(value) {
            Ok(record) => {
                records.insert(key, record);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Skipping malformed catalog entry");
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(name: &str) -> CatalogRecord {
        CatalogRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_order() {
        let store = InMemoryCatalogStore::from_records([
            ("GA21001A1", record("exact")),
            ("NY0040-09W", record("formatted")),
            ("GA-B2100", record("prefix")),
        ]);

        assert_eq!(store.lookup("ga-2100-1a1").unwrap().name, "exact");
        assert_eq!(store.lookup("NY0040 09W").unwrap().name, "formatted");
        assert_eq!(store.lookup("GA-B2100-1A1").unwrap().name, "prefix");
        assert!(store.lookup("SKX007").is_none());
        assert!(store.lookup("--").is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_overlapping_prefixes_use_sorted_order() {
        let store = InMemoryCatalogStore::from_records([
            ("GA-B2100-1", record("longer")),
            ("GA-B2100", record("shorter")),
        ]);
        assert_eq!(store.lookup("GA-B2100-1A1").unwrap().name, "shorter");
    }

    #[test]
    fn test_shorter_input_matches_longer_key() {
        let store = InMemoryCatalogStore::from_records([("SRPD55K1", record("srpd"))]);
        assert_eq!(store.lookup("SRPD55").unwrap().name, "srpd");
    }

    #[test]
    fn test_json_store_skips_bad_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "GA-2100-1A1": {{ "name": "CASIO GA-2100-1A1", "brand": "CASIO", "price": 199 }},
                "BROKEN": 42
            }}"#
        )
        .unwrap();

        let store = JsonCatalogStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        let found = store.lookup("GA-2100-1A1").unwrap();
        assert_eq!(found.brand, "CASIO");
        assert_eq!(found.price, "199");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(JsonCatalogStore::load(&path).is_err());

        let store = JsonCatalogStore::open_or_empty(&path);
        assert!(store.is_empty());
        assert!(store.lookup("GA-2100").is_none());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{}").unwrap();
        let store = JsonCatalogStore::load(&path).unwrap();
        assert!(store.is_empty());

        std::fs::write(&path, r#"{"SKX007": {"name": "SEIKO SKX007"}}"#).unwrap();
        assert_eq!(store.reload().unwrap(), 1);
        assert_eq!(store.lookup("skx007").unwrap().name, "SEIKO SKX007");

        std::fs::write(&path, "not json").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.len(), 1);
    }
}
