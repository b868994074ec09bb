//! Application State

use std::sync::Arc;

use parking_lot::RwLock;

use watch_catalog_classifier::{CatalogError, JsonCatalogStore, WatchPipeline};
use watch_catalog_config::Settings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration, behind a lock so handlers read the live limits
    pub config: Arc<RwLock<Settings>>,
    pub pipeline: Arc<WatchPipeline>,
    /// Same store the pipeline reads from, kept concrete for reloads
    pub catalog: Arc<JsonCatalogStore>,
}

impl AppState {
    /// Build state from settings, opening the configured catalog file
    pub fn new(config: Settings) -> Self {
        let catalog = Arc::new(JsonCatalogStore::open_or_empty(&config.catalog.path));
        Self::with_catalog(config, catalog)
    }

    /// Build state around an already opened catalog
    pub fn with_catalog(config: Settings, catalog: Arc<JsonCatalogStore>) -> Self {
        let pipeline = WatchPipeline::from_settings(&config, catalog.clone());
        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline: Arc::new(pipeline),
            catalog,
        }
    }

    /// Re-read the catalog file; returns the new record count
    pub fn reload_catalog(&self) -> Result<usize, CatalogError> {
        self.catalog.reload()
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
