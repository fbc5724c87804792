//! Consensus outcomes

use pv_01_detector::{DetectorError, FailureKind, Vote};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The single decision a round produces.
///
/// Only `Accepted` may open the write path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Authentic: the real share cleared the threshold.
    Accepted,
    /// Deepfake detected: the fake share cleared the threshold.
    Rejected,
    /// Neither side cleared the threshold, or no node answered.
    Inconclusive,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
            Decision::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InconclusiveReason {
    NoValidResponses,
    NoMajority,
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InconclusiveReason::NoValidResponses => f.write_str("no valid responses"),
            InconclusiveReason::NoMajority => f.write_str("no majority cleared the threshold"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub real: usize,
    pub fake: usize,
}

impl VoteCounts {
    pub fn total(&self) -> usize {
        self.real + self.fake
    }
}

/// What one node contributed to a round.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeReport {
    pub endpoint: String,
    pub result: Result<Vote, DetectorError>,
}

impl NodeReport {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.result.as_ref().err().map(DetectorError::kind)
    }
}

/// Decision plus its supporting figures.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsensusOutcome {
    pub decision: Decision,
    pub counts: VoteCounts,
    /// Nodes that produced no valid vote
    pub failed_nodes: usize,
    /// Winning side's share of valid votes (`None` when inconclusive)
    pub winning_ratio: Option<f64>,
    /// Mean confidence of the winning side's votes (`None` when inconclusive)
    pub average_confidence: Option<f64>,
    pub inconclusive_reason: Option<InconclusiveReason>,
    pub node_reports: Vec<NodeReport>,
}

impl ConsensusOutcome {
    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accepted
    }

    /// One-line description for logs and user-facing statuses.
    pub fn summary(&self) -> String {
        let total = self.counts.total();
        match self.decision {
            Decision::Accepted => format!(
                "authentic ({}/{} real votes, confidence {:.1}%)",
                self.counts.real,
                total,
                self.average_confidence.unwrap_or(0.0) * 100.0
            ),
            Decision::Rejected => format!(
                "deepfake detected ({}/{} fake votes, confidence {:.1}%)",
                self.counts.fake,
                total,
                self.average_confidence.unwrap_or(0.0) * 100.0
            ),
            Decision::Inconclusive => {
                let reason = self
                    .inconclusive_reason
                    .unwrap_or(InconclusiveReason::NoMajority);
                format!(
                    "inconclusive: {} ({} real, {} fake, {} nodes failed)",
                    reason, self.counts.real, self.counts.fake, self.failed_nodes
                )
            }
        }
    }
}
