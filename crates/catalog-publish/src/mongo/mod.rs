use std::time::Duration;

use async_trait::async_trait;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_core::redact_uri;

use crate::document::CatalogDocument;
use crate::errors::PublishError;
use crate::filter::KeyFilter;
use crate::store::CatalogStore;

mod filters;

const BACKEND: &str = "mongodb";

/// Where the catalog collection lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Environment variable holding the connection URI.
    pub uri_env: String,
    pub database: String,
    pub collection: String,
    /// Server selection timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            uri_env: "CATALOG_STORE_URI".to_string(),
            database: "inventario".to_string(),
            collection: "productos".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Store backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoCatalogStore {
    collection: Collection<CatalogDocument>,
}

impl MongoCatalogStore {
    /// Wrap an existing collection handle.
    pub fn new(collection: Collection<CatalogDocument>) -> Self {
        Self { collection }
    }

    /// Build a client for `uri`. No round trip happens until the first query.
    pub async fn connect(uri: &str, options: &StoreOptions) -> Result<Self, PublishError> {
        let mut client_options =
            ClientOptions::parse(uri)
                .await
                .map_err(|err| PublishError::StoreUnavailable {
                    backend: BACKEND,
                    message: err.to_string(),
                })?;
        client_options.server_selection_timeout = Some(Duration::from_secs(options.timeout_secs));
        client_options.app_name = Some("catalog".to_string());

        let client = Client::with_options(client_options)?;
        info!(
            event = "store_client_ready",
            uri = %redact_uri(uri).redacted,
            database = %options.database,
            collection = %options.collection,
        );
        Ok(Self::new(
            client
                .database(&options.database)
                .collection(&options.collection),
        ))
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn count(&self, filter: &KeyFilter) -> Result<u64, PublishError> {
        Ok(self
            .collection
            .count_documents(filters::to_document(filter))
            .await?)
    }

    async fn delete(&self, filter: &KeyFilter) -> Result<u64, PublishError> {
        let result = self
            .collection
            .delete_many(filters::to_document(filter))
            .await?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&self, documents: &[CatalogDocument]) -> Result<u64, PublishError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }
}
