use async_trait::async_trait;

use crate::document::CatalogDocument;
use crate::errors::PublishError;
use crate::filter::KeyFilter;

/// Remote catalog store.
///
/// Implementations must not deduplicate on insert: inserting a document whose
/// key already exists either fails or stores a second copy, so callers purge
/// before inserting.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns the backend identifier (e.g. `mongodb`).
    fn backend(&self) -> &'static str;

    async fn count(&self, filter: &KeyFilter) -> Result<u64, PublishError>;

    /// Delete every matching document and return how many were removed.
    async fn delete(&self, filter: &KeyFilter) -> Result<u64, PublishError>;

    /// Insert all documents and return how many were written.
    async fn insert_many(&self, documents: &[CatalogDocument]) -> Result<u64, PublishError>;
}
