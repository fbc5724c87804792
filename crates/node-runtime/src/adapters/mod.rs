//! # Adapters
//!
//! Content store implementations behind `shared_types::ContentStore`.

pub mod content_store;

pub use content_store::{FileContentStore, InMemoryContentStore};
