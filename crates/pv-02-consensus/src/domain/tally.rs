//! The decision rule
//!
//! Pure over the set of valid votes: no I/O, no clocks.

use super::{Decision, InconclusiveReason, VoteCounts};
use pv_01_detector::{Verdict, Vote};

/// Result of applying the decision rule to valid votes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tally {
    pub decision: Decision,
    pub counts: VoteCounts,
    pub winning_ratio: Option<f64>,
    pub average_confidence: Option<f64>,
    pub inconclusive_reason: Option<InconclusiveReason>,
}

/// Apply the strict-majority rule.
///
/// - zero votes: `Inconclusive(NoValidResponses)`
/// - `real / total > threshold`: `Accepted`
/// - `fake / total > threshold`: `Rejected`
/// - otherwise `Inconclusive(NoMajority)`; an exact tie never wins at 0.5
pub fn tally(votes: &[Vote], threshold: f64) -> Tally {
    let counts = VoteCounts {
        real: votes.iter().filter(|v| v.verdict == Verdict::Real).count(),
        fake: votes.iter().filter(|v| v.verdict == Verdict::Fake).count(),
    };

    let total = counts.total();
    if total == 0 {
        return inconclusive(counts, InconclusiveReason::NoValidResponses);
    }

    let real_ratio = counts.real as f64 / total as f64;
    let fake_ratio = counts.fake as f64 / total as f64;

    let (decision, ratio, side) = if real_ratio > threshold {
        (Decision::Accepted, real_ratio, Verdict::Real)
    } else if fake_ratio > threshold {
        (Decision::Rejected, fake_ratio, Verdict::Fake)
    } else {
        return inconclusive(counts, InconclusiveReason::NoMajority);
    };

    Tally {
        decision,
        counts,
        winning_ratio: Some(ratio),
        average_confidence: mean_confidence(votes, side),
        inconclusive_reason: None,
    }
}

fn inconclusive(counts: VoteCounts, reason: InconclusiveReason) -> Tally {
    Tally {
        decision: Decision::Inconclusive,
        counts,
        winning_ratio: None,
        average_confidence: None,
        inconclusive_reason: Some(reason),
    }
}

/// Mean confidence over votes on one side only.
fn mean_confidence(votes: &[Vote], side: Verdict) -> Option<f64> {
    let (sum, n) = votes
        .iter()
        .filter(|v| v.verdict == side)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v.confidence, n + 1));
    (n > 0).then(|| sum / n as f64)
}
