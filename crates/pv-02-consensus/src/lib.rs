//! # Consensus Subsystem (pv-02)
//!
//! Fans one piece of media out to every detector node, waits for every
//! node to settle, and turns the surviving votes into a single decision.
//!
//! ## Decision Rule
//!
//! | Valid votes | Condition | Decision |
//! |-------------|-----------|----------|
//! | 0 | - | `Inconclusive` (no valid responses) |
//! | n > 0 | `real / n > threshold` | `Accepted` |
//! | n > 0 | `fake / n > threshold` | `Rejected` |
//! | n > 0 | otherwise | `Inconclusive` (no majority) |
//!
//! A failed, timed-out or malformed node counts as neither side. The
//! denominator is the number of valid votes, not the number of nodes.
//!
//! ## Usage
//!
//! ```ignore
//! let coordinator = ConsensusCoordinator::new(Arc::new(HttpDetectorClient::new()), config)?;
//! let outcome = coordinator.evaluate(&request).await?;
//! if outcome.is_accepted() { /* open the write path */ }
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{
    tally, validate_threshold, ConsensusConfig, ConsensusError, ConsensusOutcome,
    ConsensusResult, Decision, InconclusiveReason, NodeReport, Tally, VoteCounts,
    DEFAULT_ENDPOINTS, DEFAULT_NODE_TIMEOUT, DEFAULT_THRESHOLD,
};
pub use ports::ConsensusApi;
pub use service::ConsensusCoordinator;
