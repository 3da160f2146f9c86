use thiserror::Error;

/// Errors raised while publishing to the catalog store.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The store could not be reached; nothing was modified.
    #[error("{backend} store unavailable: {message}")]
    StoreUnavailable {
        backend: &'static str,
        message: String,
    },
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),
}
