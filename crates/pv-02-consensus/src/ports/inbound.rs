//! Driving ports (Inbound API)

use crate::domain::{ConsensusError, ConsensusOutcome};
use async_trait::async_trait;
use pv_01_detector::DetectionRequest;
use std::time::Duration;

/// Primary Consensus API
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// Run one round against an explicit node set.
    ///
    /// Every node is queried concurrently and every query is awaited to
    /// completion or timeout; a failed node contributes no vote.
    async fn decide(
        &self,
        request: &DetectionRequest,
        endpoints: &[String],
        timeout: Duration,
        threshold: f64,
    ) -> Result<ConsensusOutcome, ConsensusError>;

    /// Run one round against the configured node set.
    async fn evaluate(&self, request: &DetectionRequest) -> Result<ConsensusOutcome, ConsensusError>;
}
