//! Consensus Coordinator - fan-out, settle, tally
//!
//! # Architecture
//! - One `DetectorApi::query` per endpoint, all in flight at once
//! - Wait-for-all-settled: never short-circuits on the first answer or failure
//! - Per-node timeout; expiry cancels only that node's request
//! - Failed or invalid answers are dropped before the tally


use crate::domain::{
    tally, validate_threshold, ConsensusConfig, ConsensusError, ConsensusOutcome,
    ConsensusResult, NodeReport,
};
use crate::metrics;
use crate::ports::ConsensusApi;
use async_trait::async_trait;
use futures::future::join_all;
use pv_01_detector::{DetectionRequest, DetectorApi, DetectorError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Consensus Coordinator
pub struct ConsensusCoordinator<D>
where
    D: DetectorApi,
{
    detector: Arc<D>,
    config: ConsensusConfig,
}

impl<D> ConsensusCoordinator<D>
where
    D: DetectorApi,
{
    /// Create a coordinator; rejects an unusable configuration up front.
    pub fn new(detector: Arc<D>, config: ConsensusConfig) -> ConsensusResult<Self> {
        config.validate()?;
        Ok(Self { detector, config })
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    async fn query_node(
        &self,
        endpoint: &str,
        request: &DetectionRequest,
        timeout: Duration,
    ) -> NodeReport {
        // Bound the round even if an adapter ignores its timeout.
        let result =
            match tokio::time::timeout(timeout, self.detector.query(endpoint, request, timeout))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(DetectorError::Timeout {
                    endpoint: endpoint.to_string(),
                    after: timeout,
                }),
            };

        if let Err(e) = &result {
            warn!(
                endpoint,
                kind = e.kind().as_str(),
                error = %e,
                "[pv-02] detector node produced no vote"
            );
            metrics::record_node_failure(e.kind().as_str());
        }

        NodeReport {
            endpoint: endpoint.to_string(),
            result,
        }
    }
}

#[async_trait]
impl<D> ConsensusApi for ConsensusCoordinator<D>
where
    D: DetectorApi,
{
    async fn decide(
        &self,
        request: &DetectionRequest,
        endpoints: &[String],
        timeout: Duration,
        threshold: f64,
    ) -> Result<ConsensusOutcome, ConsensusError> {
        validate_threshold(threshold)?;
        if endpoints.is_empty() {
            return Err(ConsensusError::NoEndpoints);
        }
        if timeout.is_zero() {
            return Err(ConsensusError::ZeroTimeout);
        }
        if request.is_empty() {
            return Err(ConsensusError::EmptyContent);
        }

        let started = Instant::now();
        let node_reports = join_all(
            endpoints
                .iter()
                .map(|endpoint| self.query_node(endpoint, request, timeout)),
        )
        .await;

        let votes: Vec<_> = node_reports
            .iter()
            .filter_map(|report| report.result.as_ref().ok().copied())
            .collect();
        let failed_nodes = node_reports.len() - votes.len();
        let result = tally(&votes, threshold);

        let outcome = ConsensusOutcome {
            decision: result.decision,
            counts: result.counts,
            failed_nodes,
            winning_ratio: result.winning_ratio,
            average_confidence: result.average_confidence,
            inconclusive_reason: result.inconclusive_reason,
            node_reports,
        };

        metrics::record_decision(outcome.decision.as_str());
        metrics::record_round_latency(started.elapsed().as_secs_f64());
        info!(
            decision = %outcome.decision,
            real = outcome.counts.real,
            fake = outcome.counts.fake,
            failed = failed_nodes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[pv-02] consensus round complete: {}",
            outcome.summary()
        );

        Ok(outcome)
    }

    async fn evaluate(&self, request: &DetectionRequest) -> Result<ConsensusOutcome, ConsensusError> {
        self.decide(
            request,
            &self.config.endpoints,
            self.config.node_timeout,
            self.config.threshold,
        )
        .await
    }
}
