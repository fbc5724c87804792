//! # Domain Errors
//!
//! Every ledger mutation is all-or-nothing: any of these errors means no
//! key was written.

use shared_types::{ContentId, Identity};
use std::fmt;

/// Errors returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Empty id or fingerprint, null identity, self-grant.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Records are never overwritten.
    #[error("Record {id} already exists")]
    DuplicateId { id: ContentId },

    #[error("Record {id} not found")]
    NotFound { id: ContentId },

    #[error("{caller} may not change access to {id}")]
    Forbidden { caller: Identity, id: ContentId },

    #[error("{viewer} already has access to {id}")]
    AlreadyGranted { id: ContentId, viewer: Identity },

    #[error("{viewer} has no active grant on {id}")]
    NotGranted { id: ContentId, viewer: Identity },

    /// Backing store failed or returned undecodable data.
    #[error("Ledger storage error: {message}")]
    Storage { message: String },
}

impl LedgerError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    IOError { message: String },
    /// Data corruption in the store.
    CorruptionError { message: String },
    /// Another handle holds the store's exclusive lock.
    AlreadyLocked { path: String },
}

impl fmt::Display for KVStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KVStoreError::IOError { message } => write!(f, "KV store I/O error: {}", message),
            KVStoreError::CorruptionError { message } => {
                write!(f, "KV store corruption: {}", message)
            }
            KVStoreError::AlreadyLocked { path } => {
                write!(f, "KV store already in use ({})", path)
            }
        }
    }
}

impl std::error::Error for KVStoreError {}

impl From<KVStoreError> for LedgerError {
    fn from(err: KVStoreError) -> Self {
        LedgerError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for LedgerError {
    fn from(err: bincode::Error) -> Self {
        LedgerError::Storage {
            message: format!("codec: {}", err),
        }
    }
}
