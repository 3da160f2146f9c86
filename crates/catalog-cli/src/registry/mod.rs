mod logging;
mod run;

pub use logging::init_run_logging;
pub use run::{
    GitInfo, QualityArtifact, RunConfig, RunContext, RunPaths, StoreTarget, collect_git_info,
    start_run, write_quality, write_report, write_synthetic,
};

use thiserror::Error;

/// Registry-level errors for run artifacts.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("synthetic output error: {0}")]
    Synthetic(#[from] catalog_generate::GenerationError),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
