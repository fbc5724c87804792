//! # Consensus Metrics
//!
//! Prometheus metrics for detector rounds.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! pv-02-consensus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `provenance_consensus_decisions_total` - Rounds by decision
//! - `provenance_detector_failures_total` - Node failures by kind
//! - `provenance_consensus_round_seconds` - Histogram of round latency

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Completed rounds, labeled by decision
    pub static ref DECISIONS: CounterVec = register_counter_vec!(
        "provenance_consensus_decisions_total",
        "Total consensus rounds by decision",
        &["decision"]
    )
    .expect("Failed to create DECISIONS metric");

    /// Nodes that produced no vote, labeled by failure kind
    pub static ref NODE_FAILURES: CounterVec = register_counter_vec!(
        "provenance_detector_failures_total",
        "Total detector node failures by kind",
        &["kind"]
    )
    .expect("Failed to create NODE_FAILURES metric");

    /// Wall time of a full round, slowest node included
    pub static ref ROUND_LATENCY: Histogram = register_histogram!(
        "provenance_consensus_round_seconds",
        "Time taken to settle a consensus round in seconds",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to create ROUND_LATENCY metric");
}

#[cfg(feature = "metrics")]
pub fn record_decision(decision: &str) {
    DECISIONS.with_label_values(&[decision]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_node_failure(kind: &str) {
    NODE_FAILURES.with_label_values(&[kind]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_round_latency(seconds: f64) {
    ROUND_LATENCY.observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_decision(_decision: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_node_failure(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_round_latency(_seconds: f64) {}
