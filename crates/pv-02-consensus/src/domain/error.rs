//! Error types for the Consensus subsystem
//!
//! Node failures are never errors here: they become missing votes.
//! These errors only reject a round that cannot be run at all.

/// Consensus error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsensusError {
    #[error("Invalid threshold {0}: must be finite and within [0.5, 1)")]
    InvalidThreshold(f64),

    #[error("No detector endpoints configured")]
    NoEndpoints,

    #[error("Node timeout must be non-zero")]
    ZeroTimeout,

    #[error("Cannot run consensus on empty content")]
    EmptyContent,
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;
