use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::reader::SourceFormat;

/// Errors raised while reading a catalog source. All of them abort the run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed {format} source {}: {message}", .path.display())]
    Format {
        format: SourceFormat,
        path: PathBuf,
        message: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IngestError {
    pub(crate) fn format(format: SourceFormat, path: &Path, message: impl Into<String>) -> Self {
        IngestError::Format {
            format,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
