use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use catalog_generate::SyntheticBatch;

use crate::document::CatalogDocument;
use crate::errors::PublishError;
use crate::filter::KeyFilter;
use crate::store::CatalogStore;

/// What one publication did to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReport {
    pub backend: String,
    /// Documents in the collection before anything was touched.
    pub existing_total: u64,
    pub purged: u64,
    pub inserted: u64,
    pub expected: u64,
    /// Documents found in the batch key range after insertion.
    pub verified: u64,
    pub count_mismatch: bool,
}

/// Replace the batch key range in `store` with `batch`.
///
/// Runs a connectivity count, purges the range, inserts the batch and counts
/// the range again. A failed connectivity check aborts before any mutation.
/// A verification count different from the batch size is reported, not raised.
pub async fn publish(
    store: &dyn CatalogStore,
    batch: &SyntheticBatch,
) -> Result<PublishReport, PublishError> {
    let backend = store.backend();
    let started = Instant::now();

    let existing_total =
        store
            .count(&KeyFilter::All)
            .await
            .map_err(|err| PublishError::StoreUnavailable {
                backend,
                message: err.to_string(),
            })?;
    info!(event = "store_reachable", backend, total = existing_total);

    let range = KeyFilter::from(SyntheticBatch::key_range());
    let purged = store.delete(&range).await?;
    info!(event = "range_purged", backend, purged);

    let documents: Vec<CatalogDocument> = batch.records.iter().map(CatalogDocument::from).collect();
    let inserted = store.insert_many(&documents).await?;
    info!(event = "batch_inserted", backend, inserted);

    let expected = documents.len() as u64;
    let verified = store.count(&range).await?;
    let count_mismatch = verified != expected;
    if count_mismatch {
        warn!(
            event = "count_mismatch",
            backend,
            expected,
            verified,
            "key range does not hold exactly the published batch"
        );
    }

    info!(
        event = "publish_complete",
        backend,
        verified,
        duration_ms = started.elapsed().as_millis() as u64,
    );

    Ok(PublishReport {
        backend: backend.to_string(),
        existing_total,
        purged,
        inserted,
        expected,
        verified,
        count_mismatch,
    })
}
