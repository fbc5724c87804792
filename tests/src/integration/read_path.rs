//! # Read path
//!
//! ledger → fetch → verify. Access follows the grant relation at read
//! time; verification reports drift but never changes the ledger.

#[cfg(test)]
mod tests {
    use super::super::harness::{authentic_node, detector, node_with, NodeBehaviour, TestNode};
    use node_runtime::container::{NodeConfig, NodeContainer};
    use node_runtime::UserStatus;
    use pv_03_ledger::{GrantPolicy, LedgerError, LedgerEvent};
    use pv_04_verification::VerificationStatus;
    use shared_types::{ContentId, Identity};

    async fn submit(t: &TestNode, owner: &Identity, bytes: &[u8]) -> ContentId {
        t.node
            .submissions()
            .submit(owner, bytes.to_vec(), "media.png")
            .await
            .unwrap()
            .content_id
    }

    #[tokio::test]
    async fn test_shared_item_visible_until_revoked() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let bob = Identity::new("0xb0b");
        let id = submit(&t, &alice, b"family video").await;
        let access = t.node.access();
        let library = t.node.library();

        access.grant(&alice, &id, &bob).unwrap();
        let reports = library.list_verified(&bob).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, VerificationStatus::Verified);

        access.revoke(&alice, &id, &bob).unwrap();
        assert!(library.list_verified(&bob).await.unwrap().is_empty());
        assert!(!access.check(&id, &bob).unwrap());

        access.grant(&alice, &id, &bob).unwrap();
        assert!(access.check(&id, &bob).unwrap());
        assert_eq!(library.list_verified(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tampered_content_is_flagged_not_erased() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let id = submit(&t, &alice, b"original footage").await;
        let events_before = t.node.ledger.read().events_since(0).unwrap().len();

        t.store.overwrite(&id, b"edited footage".to_vec());
        let reports = t.node.library().list_verified(&alice).await.unwrap();

        assert_eq!(reports.len(), 1);
        assert!(reports[0].status.is_mismatch());
        assert_eq!(
            UserStatus::from_report(&reports[0]).kind(),
            "recorded-but-diverged"
        );
        assert_eq!(
            t.node.ledger.read().events_since(0).unwrap().len(),
            events_before
        );
    }

    #[tokio::test]
    async fn test_lost_content_is_error_not_mismatch() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let id = submit(&t, &alice, b"ephemeral").await;

        t.store.remove(&id);
        let report = t.node.library().verify(&id).await.unwrap().unwrap();

        assert!(matches!(report.status, VerificationStatus::Error { .. }));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_revoke() {
        let t = authentic_node().await;
        let alice = Identity::new("0xa11ce");
        let bob = Identity::new("0xb0b");
        let mallory = Identity::new("0x3a11");
        let id = submit(&t, &alice, b"photo").await;
        let access = t.node.access();

        access.grant(&alice, &id, &bob).unwrap();
        assert!(matches!(
            access.revoke(&mallory, &id, &bob),
            Err(LedgerError::Forbidden { .. })
        ));
        assert!(access.check(&id, &bob).unwrap());
    }

    #[tokio::test]
    async fn test_delegated_sharing_is_traceable() {
        let t = node_with(vec![NodeBehaviour::Real(0.9)], GrantPolicy::OwnerOrViewer).await;
        let alice = Identity::new("0xa11ce");
        let bob = Identity::new("0xb0b");
        let carol = Identity::new("0xca201");
        let id = submit(&t, &alice, b"press photo").await;
        let access = t.node.access();

        access.grant(&alice, &id, &bob).unwrap();
        access.grant(&bob, &id, &carol).unwrap();
        assert!(matches!(
            access.revoke(&bob, &id, &carol),
            Err(LedgerError::Forbidden { .. })
        ));
        access.revoke(&alice, &id, &carol).unwrap();

        let trail: Vec<String> = access
            .history(&id)
            .unwrap()
            .into_iter()
            .map(|e| match e.event {
                LedgerEvent::RecordAdded { owner, .. } => format!("added:{}", owner),
                LedgerEvent::AccessGranted {
                    granted_by, viewer, ..
                } => format!("granted:{}->{}", granted_by, viewer),
                LedgerEvent::AccessRevoked { owner, viewer, .. } => {
                    format!("revoked:{}->{}", owner, viewer)
                }
            })
            .collect();

        assert_eq!(
            trail,
            vec![
                "added:0xa11ce",
                "granted:0xa11ce->0xb0b",
                "granted:0xb0b->0xca201",
                "revoked:0xa11ce->0xca201",
            ]
        );
    }

    #[tokio::test]
    async fn test_durable_node_reopens_with_content() {
        let servers = vec![
            detector(NodeBehaviour::Real(0.9)).await,
            detector(NodeBehaviour::Real(0.8)).await,
        ];
        let dir = tempfile::tempdir().unwrap();
        let mut config = NodeConfig::default().with_data_dir(dir.path());
        config.consensus.endpoints = servers
            .iter()
            .map(|s| format!("{}/predict", s.uri()))
            .collect();
        let alice = Identity::new("0xa11ce");

        let id = {
            let node = NodeContainer::build(config.clone()).unwrap();
            node.submissions()
                .submit(&alice, b"archived clip".to_vec(), "clip.mp4")
                .await
                .unwrap()
                .content_id
        };

        let reopened = NodeContainer::build(config).unwrap();
        let reports = reopened.library().list_verified(&alice).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].record.id, id);
        assert!(reports[0].status.is_verified());
    }
}
