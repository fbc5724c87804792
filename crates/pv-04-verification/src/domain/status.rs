//! Verification statuses

use pv_03_ledger::Record;
use serde::{Deserialize, Serialize};
use shared_types::Fingerprint;
use std::fmt;

/// Whether retrieved content still matches its anchored fingerprint.
///
/// A fetch failure or empty payload is `Error`, never `Mismatch`: only
/// bytes that were actually hashed can disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Mismatch {
        expected: Fingerprint,
        actual: Fingerprint,
    },
    Error {
        reason: String,
    },
}

impl VerificationStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, VerificationStatus::Mismatch { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Mismatch { .. } => "mismatch",
            VerificationStatus::Error { .. } => "error",
        }
    }

    pub(crate) fn error(reason: impl Into<String>) -> Self {
        VerificationStatus::Error {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Verified => f.write_str("content matches its recorded fingerprint"),
            VerificationStatus::Mismatch { expected, actual } => write!(
                f,
                "content has changed: recorded {}, retrieved {}",
                expected, actual
            ),
            VerificationStatus::Error { reason } => write!(f, "could not verify: {}", reason),
        }
    }
}

/// One record and what its retrieved content verified to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub record: Record,
    pub status: VerificationStatus,
}
