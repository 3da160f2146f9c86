use std::path::{Path, PathBuf};

use async_trait::async_trait;

use catalog_core::{CellValue, Dataset};

use crate::errors::IngestError;
use crate::reader::{SourceFormat, SourceReader};

/// Reader for the delimited-text source. The first record is the header.
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    path: PathBuf,
    delimiter: char,
}

impl DelimitedReader {
    pub fn new(path: PathBuf, delimiter: char) -> Self {
        Self { path, delimiter }
    }
}

#[async_trait]
impl SourceReader for DelimitedReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Delimited
    }

    async fn read(&self) -> Result<Dataset, IngestError> {
        read_delimited(&self.path, self.delimiter)
    }
}

/// Read a delimited-text catalog. Empty fields become nulls; every other
/// field is kept as text and typed later by coercion.
pub fn read_delimited(path: &Path, delimiter: char) -> Result<Dataset, IngestError> {
    let delimiter = u8::try_from(delimiter).map_err(|_| {
        IngestError::format(
            SourceFormat::Delimited,
            path,
            format!("delimiter '{delimiter}' is not a single byte"),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.iter().any(String::is_empty) {
        return Err(IngestError::format(
            SourceFormat::Delimited,
            path,
            "header contains an empty column name",
        ));
    }

    let mut dataset = Dataset::new(columns);
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    CellValue::Null
                } else {
                    CellValue::text(field)
                }
            })
            .collect();
        dataset.push_row(row).map_err(|err| {
            IngestError::format(SourceFormat::Delimited, path, err.to_string())
        })?;
    }
    Ok(dataset)
}
