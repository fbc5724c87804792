//! Hashing error types.

use thiserror::Error;

/// Fingerprinting errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Zero-length input has no meaningful fingerprint.
    #[error("Cannot fingerprint empty input")]
    EmptyInput,
}
