//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised when constructing a shared value type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Content identifier was empty.
    #[error("Content id must not be empty")]
    EmptyContentId,

    /// Fingerprint was empty or not hexadecimal.
    #[error("Invalid fingerprint: {reason}")]
    InvalidFingerprint { reason: String },
}

/// Errors returned by a content store (pinning service or gateway).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentStoreError {
    /// No content is pinned under this identifier.
    #[error("Content not found: {0}")]
    NotFound(String),

    /// The store could not be reached.
    #[error("Content store unreachable: {0}")]
    Network(String),

    /// Local I/O failure while reading or writing content.
    #[error("Content store I/O error: {0}")]
    Io(String),

    /// Request rejected before reaching the store.
    #[error("Invalid content store request: {0}")]
    InvalidInput(String),
}
