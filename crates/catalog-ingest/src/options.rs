use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locations of the four catalog sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub xml: PathBuf,
    pub sqlite: PathBuf,
    /// Table queried in the SQLite snapshot.
    pub sqlite_table: String,
    /// Field delimiter of the delimited-text source.
    pub delimiter: char,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            json: PathBuf::from("productos.json"),
            csv: PathBuf::from("productos.txt"),
            xml: PathBuf::from("productos.xml"),
            sqlite: PathBuf::from("productos.db"),
            sqlite_table: "productos".to_string(),
            delimiter: ',',
        }
    }
}
