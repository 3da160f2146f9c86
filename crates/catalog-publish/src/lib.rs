//! Idempotent publication of synthetic batches into a document store.

pub mod document;
pub mod errors;
pub mod filter;
pub mod memory;
pub mod mongo;
pub mod publisher;
pub mod store;

pub use document::CatalogDocument;
pub use errors::PublishError;
pub use filter::KeyFilter;
pub use memory::InMemoryCatalogStore;
pub use mongo::{MongoCatalogStore, StoreOptions};
pub use publisher::{PublishReport, publish};
pub use store::CatalogStore;
