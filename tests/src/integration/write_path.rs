//! # Write path
//!
//! hash → consensus → pin → ledger. Anything short of `Accepted` must
//! leave both the content store and the ledger untouched.

#[cfg(test)]
mod tests {
    use super::super::harness::{authentic_node, node_with, NodeBehaviour};
    use node_runtime::{SubmissionError, UserStatus};
    use pv_02_consensus::{Decision, InconclusiveReason, VoteCounts};
    use pv_03_ledger::{GrantPolicy, LedgerError};
    use shared_crypto::HashEngine;
    use shared_types::{ContentStore, Identity};
    use std::time::Duration;

    #[tokio::test]
    async fn test_accepted_media_is_recorded() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");

        let receipt = t
            .node
            .submissions()
            .submit(&alice, b"portrait".to_vec(), "portrait.png")
            .await
            .unwrap();

        assert_eq!(receipt.outcome.decision, Decision::Accepted);
        assert_eq!(receipt.outcome.counts, VoteCounts { real: 2, fake: 1 });
        assert!((receipt.outcome.average_confidence.unwrap() - 0.85).abs() < 1e-9);
        assert_eq!(receipt.fingerprint, HashEngine::compute(b"portrait").unwrap());

        let accessible = t.node.ledger.read().get_accessible(&alice).unwrap();
        assert_eq!(accessible.len(), 1);
        assert_eq!(accessible[0].fingerprint, receipt.fingerprint);
        assert_eq!(
            t.store.fetch(&receipt.content_id).await.unwrap(),
            b"portrait".to_vec()
        );
    }

    #[tokio::test]
    async fn test_deepfake_is_not_recorded() {
        let t = node_with(
            vec![
                NodeBehaviour::Fake(0.9),
                NodeBehaviour::Fake(0.7),
                NodeBehaviour::Real(0.9),
            ],
            GrantPolicy::OwnerOnly,
        )
        .await;
        let alice = Identity::new("0xa11ce");

        let result = t
            .node
            .submissions()
            .submit(&alice, b"swapped face".to_vec(), "face.jpg")
            .await;

        match &result {
            Err(SubmissionError::Rejected(outcome)) => {
                assert!((outcome.average_confidence.unwrap() - 0.8).abs() < 1e-9)
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(!UserStatus::from_submission(&result).is_recorded());
        assert!(t.store.is_empty());
        assert!(t.node.ledger.read().events_since(0).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_valid_votes_is_inconclusive() {
        let t = node_with(
            vec![
                NodeBehaviour::ServerError,
                NodeBehaviour::Garbage,
                NodeBehaviour::Slow(Duration::from_secs(10)),
            ],
            GrantPolicy::OwnerOnly,
        )
        .await;

        let result = t
            .node
            .submissions()
            .submit(&Identity::new("0xa11ce"), b"clip".to_vec(), "clip.mp4")
            .await;

        match result {
            Err(SubmissionError::Inconclusive(outcome)) => {
                assert_eq!(
                    outcome.inconclusive_reason,
                    Some(InconclusiveReason::NoValidResponses)
                );
                assert_eq!(outcome.failed_nodes, 3);
            }
            other => panic!("expected inconclusive, got {:?}", other),
        }
        assert!(t.store.is_empty());
    }

    #[tokio::test]
    async fn test_single_surviving_vote_decides() {
        let t = node_with(
            vec![
                NodeBehaviour::Real(0.7),
                NodeBehaviour::ServerError,
                NodeBehaviour::Slow(Duration::from_secs(10)),
            ],
            GrantPolicy::OwnerOnly,
        )
        .await;

        let receipt = t
            .node
            .submissions()
            .submit(&Identity::new("0xa11ce"), b"clip".to_vec(), "clip.mp4")
            .await
            .unwrap();

        assert_eq!(receipt.outcome.counts, VoteCounts { real: 1, fake: 0 });
        assert_eq!(receipt.outcome.failed_nodes, 2);
        assert_eq!(receipt.outcome.winning_ratio, Some(1.0));
    }

    #[tokio::test]
    async fn test_tie_records_nothing() {
        let t = node_with(
            vec![NodeBehaviour::Real(0.99), NodeBehaviour::Fake(0.99)],
            GrantPolicy::OwnerOnly,
        )
        .await;

        let result = t
            .node
            .submissions()
            .submit(&Identity::new("0xa11ce"), b"clip".to_vec(), "clip.mp4")
            .await;

        assert!(matches!(result, Err(SubmissionError::Inconclusive(_))));
        assert!(t.store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_submissions_record_once() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let bob = Identity::new("0xb0b");
        let first = t.node.submissions();
        let second = t.node.submissions();

        let (a, b) = tokio::join!(
            first.submit(&alice, b"viral clip".to_vec(), "a.mp4"),
            second.submit(&bob, b"viral clip".to_vec(), "b.mp4"),
        );

        let results = [a, b];
        let recorded = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(SubmissionError::Ledger(LedgerError::DuplicateId { .. }))
                )
            })
            .count();
        assert_eq!((recorded, duplicates), (1, 1));

        let ledger = t.node.ledger.read();
        let owned = ledger.owned_by(&alice).unwrap().len() + ledger.owned_by(&bob).unwrap().len();
        assert_eq!(owned, 1);
        assert_eq!(ledger.events_since(0).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_distinct_submissions_all_recorded() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let pipeline = t.node.submissions();

        let results = futures::future::join_all((0..5).map(|i| {
            pipeline.submit(&alice, format!("frame {}", i).into_bytes(), "frame.png")
        }))
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
        let events = t.node.ledger.read().events_since(0).unwrap();
        let sequences: Vec<u64> = events.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
    }
}
