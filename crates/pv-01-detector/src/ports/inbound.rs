//! Driving ports (Inbound API)

use crate::domain::{DetectionRequest, DetectorError, Vote};
use async_trait::async_trait;
use std::time::Duration;

/// Single-node detector API
///
/// # Contract
/// - Exactly one request per call, no internal retries
/// - Timeout expiry cancels the in-flight request and yields `Timeout`
/// - Transport failure yields `Network`
/// - A body that is not `{is_deepfake, confidence}` yields `InvalidResponse`
#[async_trait]
pub trait DetectorApi: Send + Sync {
    async fn query(
        &self,
        endpoint: &str,
        request: &DetectionRequest,
        timeout: Duration,
    ) -> Result<Vote, DetectorError>;
}
