//! Consensus configuration

use super::{ConsensusError, ConsensusResult};
use std::time::Duration;

/// Default strict-majority threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default per-node timeout.
pub const DEFAULT_NODE_TIMEOUT: Duration = Duration::from_secs(30);

/// Detector nodes of a default local deployment.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "http://127.0.0.1:5001/predict",
    "http://127.0.0.1:5002/predict",
    "http://127.0.0.1:5003/predict",
];

#[derive(Clone, Debug, PartialEq)]
pub struct ConsensusConfig {
    /// A side wins only if its share of valid votes is strictly greater.
    pub threshold: f64,
    /// Independent timeout applied to each node query
    pub node_timeout: Duration,
    /// Fixed node set queried on every round
    pub endpoints: Vec<String>,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            node_timeout: DEFAULT_NODE_TIMEOUT,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ConsensusConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_node_timeout(mut self, timeout: Duration) -> Self {
        self.node_timeout = timeout;
        self
    }

    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> ConsensusResult<()> {
        validate_threshold(self.threshold)?;
        if self.endpoints.is_empty() {
            return Err(ConsensusError::NoEndpoints);
        }
        if self.node_timeout.is_zero() {
            return Err(ConsensusError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Thresholds below 0.5 would let both sides clear the bar at once.
pub fn validate_threshold(threshold: f64) -> ConsensusResult<()> {
    if !threshold.is_finite() || !(0.5..1.0).contains(&threshold) {
        return Err(ConsensusError::InvalidThreshold(threshold));
    }
    Ok(())
}
