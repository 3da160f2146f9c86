use std::fmt;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_core::Dataset;

use crate::delimited::DelimitedReader;
use crate::errors::IngestError;
use crate::json::JsonReader;
use crate::markup::MarkupReader;
use crate::options::SourceOptions;
use crate::sqlite::SqliteReader;

/// Storage format of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Json,
    Delimited,
    Markup,
    Sqlite,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Delimited => "csv",
            SourceFormat::Markup => "xml",
            SourceFormat::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait implemented by readers that load one catalog source.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Returns the storage format handled by the reader.
    fn format(&self) -> SourceFormat;

    /// Read the whole source. Zero rows is a valid result.
    async fn read(&self) -> Result<Dataset, IngestError>;
}

/// Readers for the configured sources, in consolidation order.
pub fn readers_for(options: &SourceOptions) -> Vec<Box<dyn SourceReader>> {
    vec![
        Box::new(JsonReader::new(options.json.clone())),
        Box::new(DelimitedReader::new(options.csv.clone(), options.delimiter)),
        Box::new(MarkupReader::new(options.xml.clone())),
        Box::new(SqliteReader::new(
            options.sqlite.clone(),
            options.sqlite_table.clone(),
        )),
    ]
}

/// Run every reader in order. The first failure aborts the whole ingest.
pub async fn ingest_all(
    readers: &[Box<dyn SourceReader>],
) -> Result<Vec<(SourceFormat, Dataset)>, IngestError> {
    let mut sources = Vec::with_capacity(readers.len());
    for reader in readers {
        let start = Instant::now();
        let dataset = reader.read().await?;
        info!(
            event = "source_read",
            format = %reader.format(),
            rows = dataset.len(),
            columns = dataset.columns().len(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        sources.push((reader.format(), dataset));
    }
    Ok(sources)
}
