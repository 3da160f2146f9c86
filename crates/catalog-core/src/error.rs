use thiserror::Error;

/// Core error type shared across catalog crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A row or column does not fit the dataset shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// A column required by an operation is absent.
    #[error("missing column: {0}")]
    MissingColumn(String),
    /// A value that must be present after cleaning is null.
    #[error("null value in column '{column}' at row {row}")]
    UnexpectedNull { column: String, row: usize },
}

/// Convenience alias for results returned by catalog crates.
pub type Result<T> = std::result::Result<T, Error>;
