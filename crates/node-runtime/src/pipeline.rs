//! # Submission Pipeline
//!
//! The write path. Nothing reaches the content store or the ledger unless
//! the detector consensus accepts the media:
//!
//! ```text
//! bytes ──→ HashEngine ──→ ConsensusCoordinator ──┬─ Accepted ──→ pin ──→ Ledger.add
//!                                                 └─ otherwise ──→ error, nothing written
//! ```

use crate::container::SharedLedger;
use pv_01_detector::DetectionRequest;
use pv_02_consensus::{ConsensusApi, ConsensusError, ConsensusOutcome, Decision};
use pv_03_ledger::{LedgerError, Record};
use shared_crypto::{HashEngine, HashError};
use shared_types::{ContentId, ContentStore, ContentStoreError, Fingerprint, Identity};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Proof of a committed submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub content_id: ContentId,
    pub fingerprint: Fingerprint,
    pub outcome: ConsensusOutcome,
    pub record: Record,
}

/// Why a submission left no trace.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid submission: {0}")]
    Validation(String),

    #[error("Submission rejected: {}", .0.summary())]
    Rejected(Box<ConsensusOutcome>),

    #[error("Submission not accepted: {}", .0.summary())]
    Inconclusive(Box<ConsensusOutcome>),

    #[error("Content store failure: {0}")]
    ContentStore(#[from] ContentStoreError),

    #[error("Ledger refused the record: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<HashError> for SubmissionError {
    fn from(e: HashError) -> Self {
        SubmissionError::Validation(e.to_string())
    }
}

impl From<ConsensusError> for SubmissionError {
    fn from(e: ConsensusError) -> Self {
        SubmissionError::Validation(e.to_string())
    }
}

pub struct SubmissionPipeline {
    consensus: Arc<dyn ConsensusApi>,
    content_store: Arc<dyn ContentStore>,
    ledger: SharedLedger,
}

impl SubmissionPipeline {
    pub fn new(
        consensus: Arc<dyn ConsensusApi>,
        content_store: Arc<dyn ContentStore>,
        ledger: SharedLedger,
    ) -> Self {
        Self {
            consensus,
            content_store,
            ledger,
        }
    }

    /// Submit media on behalf of `caller`.
    ///
    /// `file_name` is forwarded to the detectors as the media hint.
    pub async fn submit(
        &self,
        caller: &Identity,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if caller.is_null() {
            return Err(SubmissionError::Validation(
                "caller identity must not be null".to_string(),
            ));
        }

        let submission_id = Uuid::new_v4();
        let fingerprint = HashEngine::compute(&bytes)?;
        let request = DetectionRequest::new(bytes, file_name);

        let outcome = self.consensus.evaluate(&request).await?;
        match outcome.decision {
            Decision::Accepted => {}
            Decision::Rejected => {
                warn!(%submission_id, %fingerprint, "[node] submission rejected: {}", outcome.summary());
                return Err(SubmissionError::Rejected(Box::new(outcome)));
            }
            Decision::Inconclusive => {
                warn!(%submission_id, %fingerprint, "[node] submission inconclusive: {}", outcome.summary());
                return Err(SubmissionError::Inconclusive(Box::new(outcome)));
            }
        }

        let content_id = self.content_store.pin(request.bytes()).await?;

        // The pin above is the last await; the guard never crosses one.
        let record = self.ledger.write().add(caller, &content_id, &fingerprint)?;

        info!(
            %submission_id,
            owner = %caller,
            id = %content_id,
            %fingerprint,
            "[node] submission recorded"
        );

        Ok(SubmissionReceipt {
            submission_id,
            content_id,
            fingerprint,
            outcome,
            record,
        })
    }
}
