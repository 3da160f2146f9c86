//! Deterministic synthetic catalog rows (ids 500..600).
//!
//! The batch is drawn from a seeded ChaCha8 stream, so a fixed seed and
//! vocabulary always reproduce the same rows.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use engine::generate_batch;
pub use errors::GenerationError;
pub use model::{
    GenerateOptions, SYNTHETIC_BATCH_SIZE, SYNTHETIC_ID_START, SYNTHETIC_MARGIN, SyntheticBatch,
    SyntheticRecord, Vocabulary,
};
pub use output::write_batch_csv;
