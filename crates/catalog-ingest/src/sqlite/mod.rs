use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use tracing::debug;

use catalog_core::Dataset;

use crate::errors::IngestError;
use crate::reader::{SourceFormat, SourceReader};

mod mapper;
mod queries;

/// Reader for the local relational snapshot (SQLite).
#[derive(Debug, Clone)]
pub struct SqliteReader {
    path: PathBuf,
    table: String,
}

impl SqliteReader {
    pub fn new(path: PathBuf, table: String) -> Self {
        Self { path, table }
    }
}

#[async_trait]
impl SourceReader for SqliteReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Sqlite
    }

    async fn read(&self) -> Result<Dataset, IngestError> {
        read_sqlite(&self.path, &self.table).await
    }
}

/// Read every row of `table` from the snapshot at `path`.
///
/// The connection is opened read-only for this single extraction and closed
/// before returning, whether or not the query succeeded.
pub async fn read_sqlite(path: &Path, table: &str) -> Result<Dataset, IngestError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);
    let mut conn = SqliteConnection::connect_with(&options).await?;
    debug!(event = "sqlite_opened", path = %path.display());

    let extracted = extract(&mut conn, path, table).await;
    conn.close().await?;
    debug!(event = "sqlite_closed", path = %path.display());

    extracted
}

async fn extract(
    conn: &mut SqliteConnection,
    path: &Path,
    table: &str,
) -> Result<Dataset, IngestError> {
    let columns = queries::list_columns(conn, table).await?;
    if columns.is_empty() {
        return Err(IngestError::format(
            SourceFormat::Sqlite,
            path,
            format!("table '{table}' not found"),
        ));
    }

    let rows = queries::select_all(conn, table).await?;
    let mut dataset = Dataset::new(columns);
    for row in &rows {
        let cells = mapper::map_row(row)?;
        dataset
            .push_row(cells)
            .map_err(|err| IngestError::format(SourceFormat::Sqlite, path, err.to_string()))?;
    }
    Ok(dataset)
}
