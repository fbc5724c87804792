//! # Adapters

pub mod storage;

pub use storage::{FileBackedKVStore, InMemoryKVStore};
