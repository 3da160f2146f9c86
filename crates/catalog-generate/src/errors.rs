use thiserror::Error;

/// Errors emitted by the synthetic batch generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no known values for '{column}'; synthetic rows cannot be sampled")]
    EmptyVocabulary { column: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
