use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::document::CatalogDocument;
use crate::errors::PublishError;
use crate::filter::KeyFilter;
use crate::store::CatalogStore;

/// Process-local store used for dry runs and tests.
///
/// Like a collection without a unique index, it keeps every inserted copy.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    documents: Mutex<Vec<CatalogDocument>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `documents`.
    pub fn with_documents(documents: Vec<CatalogDocument>) -> Self {
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Snapshot of the stored documents in insertion order.
    pub fn documents(&self) -> Vec<CatalogDocument> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CatalogDocument>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn count(&self, filter: &KeyFilter) -> Result<u64, PublishError> {
        let documents = self.lock();
        Ok(documents.iter().filter(|doc| filter.matches(doc.id)).count() as u64)
    }

    async fn delete(&self, filter: &KeyFilter) -> Result<u64, PublishError> {
        let mut documents = self.lock();
        let before = documents.len();
        documents.retain(|doc| !filter.matches(doc.id));
        Ok((before - documents.len()) as u64)
    }

    async fn insert_many(&self, documents: &[CatalogDocument]) -> Result<u64, PublishError> {
        self.lock().extend_from_slice(documents);
        Ok(documents.len() as u64)
    }
}
