use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};

use catalog_core::{CellValue, Dataset};

use crate::errors::IngestError;
use crate::reader::{SourceFormat, SourceReader};

/// Reader for the structured-text (JSON) source.
#[derive(Debug, Clone)]
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SourceReader for JsonReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Json
    }

    async fn read(&self) -> Result<Dataset, IngestError> {
        read_json(&self.path)
    }
}

/// Read a JSON catalog.
///
/// Accepts a list of row objects (`[{"id": 1, ...}]`) or a column-oriented
/// object (`{"id": {"0": 1, ...}, ...}`).
pub fn read_json(path: &Path) -> Result<Dataset, IngestError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;

    match value {
        Value::Array(items) => read_records(path, items),
        Value::Object(columns) => read_columns(path, columns),
        _ => Err(IngestError::format(
            SourceFormat::Json,
            path,
            "top-level value must be an array or an object",
        )),
    }
}

fn read_records(path: &Path, items: Vec<Value>) -> Result<Dataset, IngestError> {
    let mut dataset = Dataset::default();
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(IngestError::format(
                SourceFormat::Json,
                path,
                format!("record {idx} is not an object"),
            ));
        };
        dataset.push_record(
            fields
                .iter()
                .map(|(key, value)| (key.as_str(), CellValue::from(value))),
        );
    }
    Ok(dataset)
}

fn read_columns(path: &Path, columns: Map<String, Value>) -> Result<Dataset, IngestError> {
    let mut index: Vec<String> = Vec::new();
    for (name, values) in &columns {
        let Value::Object(cells) = values else {
            return Err(IngestError::format(
                SourceFormat::Json,
                path,
                format!("column '{name}' is not an object keyed by row index"),
            ));
        };
        for key in cells.keys() {
            if !index.contains(key) {
                index.push(key.clone());
            }
        }
    }

    let mut dataset = Dataset::default();
    for row_key in &index {
        dataset.push_record(columns.iter().map(|(name, values)| {
            let cell = values
                .get(row_key)
                .map(CellValue::from)
                .unwrap_or(CellValue::Null);
            (name.as_str(), cell)
        }));
    }
    Ok(dataset)
}
