//! Source readers and schema reconciliation for the catalog pipeline.
//!
//! Each reader turns one storage format into a [`catalog_core::Dataset`];
//! [`consolidate`] unions them into the superset schema.

pub mod consolidate;
pub mod delimited;
pub mod errors;
pub mod json;
pub mod markup;
pub mod options;
pub mod reader;
pub mod sqlite;

pub use consolidate::{ConsolidatedCatalog, ConsolidationSummary, SourceSummary, consolidate};
pub use delimited::{DelimitedReader, read_delimited};
pub use errors::IngestError;
pub use json::{JsonReader, read_json};
pub use markup::{MarkupReader, read_markup};
pub use options::SourceOptions;
pub use reader::{SourceFormat, SourceReader, ingest_all, readers_for};
pub use sqlite::{SqliteReader, read_sqlite};
