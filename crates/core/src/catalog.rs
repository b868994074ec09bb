//! Catalog store abstraction

use crate::record::CatalogRecord;

/// Read-only source of known product records
///
/// Implementations resolve a model code to its stored record or report that
/// the model is unknown. Lookups never fail; an unreadable backing store
/// behaves as an empty one.
pub trait CatalogStore: Send + Sync {
    /// Find the record for `model`
    fn lookup(&self, model: &str) -> Option<CatalogRecord>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
