use std::time::Instant;

use thiserror::Error;
use tracing::info;

use catalog_core::Dataset;
use catalog_generate::{GenerationError, SyntheticBatch, Vocabulary, generate_batch};
use catalog_ingest::{ConsolidatedCatalog, IngestError, consolidate, ingest_all, readers_for};
use catalog_publish::{CatalogStore, PublishError, PublishReport, publish};
use catalog_quality::{QualityPass, clean};

use crate::config::PipelineConfig;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Ingest, consolidate and clean, without generating or publishing.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub consolidated: ConsolidatedCatalog,
    pub cleaned: Dataset,
    pub pass: QualityPass,
}

/// Everything a full run produced, in stage order.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub inspection: Inspection,
    pub batch: SyntheticBatch,
    /// Cleaned catalog plus the synthetic batch, cleaned again.
    pub merged: Dataset,
    pub merged_pass: QualityPass,
    /// `None` when publishing was skipped.
    pub publish: Option<PublishReport>,
}

pub async fn inspect(config: &PipelineConfig) -> Result<Inspection, PipelineError> {
    let timer = Instant::now();
    let readers = readers_for(&config.sources);
    let sources = ingest_all(&readers).await?;
    let consolidated = consolidate(sources);

    let (cleaned, pass) = clean(consolidated.dataset.clone(), &config.quality);
    info!(
        event = "inspection_finished",
        rows = cleaned.len(),
        duration_ms = timer.elapsed().as_millis() as u64,
    );

    Ok(Inspection {
        consolidated,
        cleaned,
        pass,
    })
}

/// Run every stage in order: ingest, consolidate, clean, generate, merge,
/// clean again, then publish when a store is given.
///
/// Generation errors surface before the store is touched.
pub async fn run(
    config: &PipelineConfig,
    store: Option<&dyn CatalogStore>,
) -> Result<PipelineOutcome, PipelineError> {
    let inspection = inspect(config).await?;

    let vocabulary = Vocabulary::from_dataset(&inspection.cleaned);
    let batch = generate_batch(&vocabulary, &config.generate)?;

    let merged = inspection.cleaned.clone().concat(batch.to_dataset());
    let (merged, merged_pass) = clean(merged, &config.quality);
    info!(event = "batch_merged", rows = merged.len());

    let published = match store {
        Some(store) => Some(publish(store, &batch).await?),
        None => {
            info!(event = "publish_skipped");
            None
        }
    };

    Ok(PipelineOutcome {
        inspection,
        batch,
        merged,
        merged_pass,
        publish: published,
    })
}
