//! # User-facing statuses
//!
//! Every outcome resolves to one line, classified by what the ledger holds
//! afterwards.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | submission failed (any reason) | `NothingRecorded` |
//! | submission committed | `Recorded` |
//! | grant / revoke refused | `NothingRecorded` |
//! | grant / revoke applied | `Recorded` |
//! | content verified | `Recorded` |
//! | content mismatch or unverifiable | `RecordedButDiverged` |

use crate::pipeline::{SubmissionError, SubmissionReceipt};
use pv_03_ledger::LedgerError;
use pv_04_verification::{VerificationReport, VerificationStatus};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStatus {
    /// The operation left no trace in the ledger.
    NothingRecorded(String),
    /// The ledger holds the result.
    Recorded(String),
    /// A record exists but its content no longer checks out.
    RecordedButDiverged(String),
}

impl UserStatus {
    pub fn from_submission(result: &Result<SubmissionReceipt, SubmissionError>) -> Self {
        match result {
            Ok(receipt) => UserStatus::Recorded(format!(
                "Recorded {} as {}: {}",
                receipt.content_id,
                receipt.fingerprint,
                receipt.outcome.summary()
            )),
            Err(SubmissionError::Rejected(outcome)) => UserStatus::NothingRecorded(format!(
                "Not recorded, {}",
                outcome.summary()
            )),
            Err(SubmissionError::Inconclusive(outcome)) => UserStatus::NothingRecorded(format!(
                "Not recorded, detectors were {}",
                outcome.summary()
            )),
            Err(SubmissionError::Ledger(LedgerError::DuplicateId { id })) => {
                UserStatus::NothingRecorded(format!("Not recorded, {} is already registered", id))
            }
            Err(e) => UserStatus::NothingRecorded(format!("Not recorded: {}", e)),
        }
    }

    /// `action` reads as a past-tense verb phrase, e.g. "granted access".
    pub fn from_access(action: &str, result: &Result<(), LedgerError>) -> Self {
        match result {
            Ok(()) => UserStatus::Recorded(format!("Ledger updated: {}", action)),
            Err(e) => UserStatus::NothingRecorded(format!("Ledger unchanged: {}", e)),
        }
    }

    pub fn from_report(report: &VerificationReport) -> Self {
        let id = &report.record.id;
        match &report.status {
            VerificationStatus::Verified => {
                UserStatus::Recorded(format!("{} verified against its record", id))
            }
            status => UserStatus::RecordedButDiverged(format!("{} is recorded but {}", id, status)),
        }
    }

    pub fn is_recorded(&self) -> bool {
        !matches!(self, UserStatus::NothingRecorded(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UserStatus::NothingRecorded(_) => "nothing-recorded",
            UserStatus::Recorded(_) => "recorded",
            UserStatus::RecordedButDiverged(_) => "recorded-but-diverged",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UserStatus::NothingRecorded(m)
            | UserStatus::Recorded(m)
            | UserStatus::RecordedButDiverged(m) => m,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
