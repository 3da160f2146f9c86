//! Core contracts shared by the catalog pipeline crates.
//!
//! Defines the loosely-typed tabular model every source is read into, the
//! catalog column vocabulary, and helpers shared by the CLI and adapters.

pub mod columns;
pub mod dataset;
pub mod error;
pub mod record;
pub mod redaction;
pub mod value;

pub use dataset::{ColumnKind, Dataset};
pub use error::{Error, Result};
pub use record::CatalogRecord;
pub use redaction::{RedactedUri, redact_uri};
pub use value::CellValue;
