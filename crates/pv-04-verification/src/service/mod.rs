//! # Verification Engine
//!
//! Re-fetch, re-hash, compare. Advisory only: nothing here writes to the
//! ledger, and each item is checked independently of every other.


use crate::domain::{VerificationReport, VerificationStatus};
use futures::future::join_all;
use pv_03_ledger::Record;
use shared_crypto::HashEngine;
use shared_types::{ContentId, ContentStore, ContentStoreError, Fingerprint};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct VerificationEngine<S>
where
    S: ContentStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> Clone for VerificationEngine<S>
where
    S: ContentStore + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> VerificationEngine<S>
where
    S: ContentStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Compare fetched content against the anchored fingerprint.
    ///
    /// Comparison is case-insensitive on the hex rendering.
    pub fn verify(
        fetched: Result<Vec<u8>, ContentStoreError>,
        expected: &Fingerprint,
    ) -> VerificationStatus {
        if expected.is_empty() {
            return VerificationStatus::error("no recorded fingerprint");
        }

        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => return VerificationStatus::error(format!("fetch failed: {}", e)),
        };

        let actual = match HashEngine::compute(&bytes) {
            Ok(fp) => fp,
            Err(e) => return VerificationStatus::error(e.to_string()),
        };

        if expected.matches(actual.as_str()) {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Mismatch {
                expected: expected.clone(),
                actual,
            }
        }
    }

    /// Fetch `id` from the content store and verify it.
    pub async fn verify_from_store(
        &self,
        id: &ContentId,
        expected: &Fingerprint,
    ) -> VerificationStatus {
        let fetched = self.store.fetch(id).await;
        let status = Self::verify(fetched, expected);

        match &status {
            VerificationStatus::Verified => debug!(id = %id, "[pv-04] content verified"),
            VerificationStatus::Mismatch { actual, .. } => warn!(
                id = %id,
                expected = %expected,
                actual = %actual,
                "[pv-04] content no longer matches its record"
            ),
            VerificationStatus::Error { reason } => {
                warn!(id = %id, reason = %reason, "[pv-04] verification failed")
            }
        }

        status
    }

    /// Verify many records concurrently. Output order follows input order.
    pub async fn verify_records(&self, records: Vec<Record>) -> Vec<VerificationReport> {
        let statuses = join_all(
            records
                .iter()
                .map(|record| self.verify_from_store(&record.id, &record.fingerprint)),
        )
        .await;

        records
            .into_iter()
            .zip(statuses)
            .map(|(record, status)| VerificationReport { record, status })
            .collect()
    }
}
