//! Error types for the Detector subsystem

use std::time::Duration;

/// Detector error types
///
/// A failed query contributes no vote; the caller decides what that means.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectorError {
    #[error("Detector {endpoint} timed out after {after:?}")]
    Timeout { endpoint: String, after: Duration },

    #[error("Detector {endpoint} unreachable: {message}")]
    Network { endpoint: String, message: String },

    #[error("Detector {endpoint} returned an invalid response: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    /// Rejected locally before anything was sent.
    #[error("Invalid request for detector {endpoint}: {reason}")]
    InvalidRequest { endpoint: String, reason: String },
}

/// Coarse failure class, used for logs and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Timeout,
    Network,
    InvalidResponse,
    InvalidRequest,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Network => "network",
            FailureKind::InvalidResponse => "invalid_response",
            FailureKind::InvalidRequest => "invalid_request",
        }
    }
}

impl DetectorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DetectorError::Timeout { .. } => FailureKind::Timeout,
            DetectorError::Network { .. } => FailureKind::Network,
            DetectorError::InvalidResponse { .. } => FailureKind::InvalidResponse,
            DetectorError::InvalidRequest { .. } => FailureKind::InvalidRequest,
        }
    }

    /// Attach the endpoint to an error raised before it was known.
    pub fn at(self, endpoint: &str) -> Self {
        match self {
            DetectorError::Timeout { after, .. } => DetectorError::Timeout {
                endpoint: endpoint.to_string(),
                after,
            },
            DetectorError::Network { message, .. } => DetectorError::Network {
                endpoint: endpoint.to_string(),
                message,
            },
            DetectorError::InvalidResponse { reason, .. } => DetectorError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason,
            },
            DetectorError::InvalidRequest { reason, .. } => DetectorError::InvalidRequest {
                endpoint: endpoint.to_string(),
                reason,
            },
        }
    }
}

/// Result type for detector operations
pub type DetectorResult<T> = Result<T, DetectorError>;
