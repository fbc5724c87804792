//! # Library Reader
//!
//! The read path: everything a caller may see, each item re-fetched and
//! re-verified. Verification is advisory and never touches the ledger.

use crate::container::SharedLedger;
use pv_03_ledger::LedgerResult;
use pv_04_verification::{VerificationEngine, VerificationReport};
use shared_types::{ContentId, ContentStore, Identity};
use tracing::info;

#[derive(Clone)]
pub struct LibraryReader {
    ledger: SharedLedger,
    verification: VerificationEngine<dyn ContentStore>,
}

impl LibraryReader {
    pub fn new(ledger: SharedLedger, verification: VerificationEngine<dyn ContentStore>) -> Self {
        Self {
            ledger,
            verification,
        }
    }

    /// Owned records first, then shared ones, each with its verification status.
    pub async fn list_verified(&self, caller: &Identity) -> LedgerResult<Vec<VerificationReport>> {
        // Snapshot, then release the lock before any fetch.
        let records = self.ledger.read().get_accessible(caller)?;
        let reports = self.verification.verify_records(records).await;

        let verified = reports.iter().filter(|r| r.status.is_verified()).count();
        info!(
            %caller,
            total = reports.len(),
            verified,
            "[node] library listed"
        );
        Ok(reports)
    }

    /// Verify a single record; `None` if the ledger has no such id.
    pub async fn verify(&self, id: &ContentId) -> LedgerResult<Option<VerificationReport>> {
        let record = self.ledger.read().get_record(id)?;
        match record {
            Some(record) => Ok(self.verification.verify_records(vec![record]).await.pop()),
            None => Ok(None),
        }
    }
}
