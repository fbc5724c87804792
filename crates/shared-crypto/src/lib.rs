//! # Shared Crypto - Content Hashing Primitives
//!
//! ## Components
//!
//! | Item | Algorithm | Use Case |
//! |------|-----------|----------|
//! | `HashEngine` | SHA-256 | Content fingerprints anchored in the ledger |
//! | `Sha256Hasher` | SHA-256 | Streaming fingerprints for large media |
//! | `blake3_content_id` | BLAKE3 | Content addressing in local stores |
//!
//! ## Properties
//!
//! - **Deterministic**: byte-identical input gives a byte-identical digest
//! - **Fixed size**: 256-bit output, rendered as 64 lowercase hex chars
//! - **Independent**: fingerprints and content ids use different algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;

// Re-exports
pub use errors::HashError;
pub use hashing::{blake3_content_id, sha256_hash, HashEngine, Sha256Hasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
