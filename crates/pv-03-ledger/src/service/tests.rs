use super::*;
use crate::adapters::InMemoryKVStore;
use crate::domain::KVStoreError;
use crate::ports::outbound::ScanResult;
use proptest::prelude::*;
use shared_types::FixedTimeSource;
use std::collections::BTreeSet;

const NOW: u64 = 1_700_000_000;

type TestLedger = Ledger<InMemoryKVStore, FixedTimeSource>;

fn ledger() -> TestLedger {
    ledger_with(GrantPolicy::OwnerOnly)
}

fn ledger_with(policy: GrantPolicy) -> TestLedger {
    Ledger::new(InMemoryKVStore::new(), FixedTimeSource(NOW), policy)
}

fn alice() -> Identity {
    Identity::new("0xA11CE")
}

fn bob() -> Identity {
    Identity::new("0xB0B")
}

fn carol() -> Identity {
    Identity::new("0xCA501")
}

fn cid(n: u8) -> ContentId {
    ContentId::new(format!("b3{:02x}", n))
}

fn fp(n: u8) -> Fingerprint {
    Fingerprint::new(format!("{:02x}", n).repeat(32))
}

fn snapshot(l: &TestLedger) -> ScanResult {
    l.store().prefix_scan(b"").unwrap()
}

fn ids(records: &[Record]) -> Vec<ContentId> {
    records.iter().map(|r| r.id.clone()).collect()
}

// =============================================================================
// add
// =============================================================================

#[test]
fn test_add_then_owner_sees_exactly_one_record() {
    let mut l = ledger();
    let record = l.add(&alice(), &cid(1), &fp(1)).unwrap();

    assert_eq!(record.owner, alice());
    assert_eq!(record.created_at, NOW);

    let visible = l.get_accessible(&alice()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, cid(1));
    assert_eq!(visible[0].fingerprint, fp(1));
}

#[test]
fn test_duplicate_id_rejected_and_state_unchanged() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    let before = snapshot(&l);

    let err = l.add(&bob(), &cid(1), &fp(2)).unwrap_err();

    assert_eq!(err, LedgerError::DuplicateId { id: cid(1) });
    assert_eq!(snapshot(&l), before);
    assert_eq!(l.get_record(&cid(1)).unwrap().unwrap().owner, alice());
}

#[test]
fn test_add_rejects_empty_inputs() {
    let mut l = ledger();

    let empty_id = l.add(&alice(), &ContentId::new(""), &fp(1));
    let empty_fp = l.add(&alice(), &cid(1), &Fingerprint::new("   "));
    let bad_fp = l.add(&alice(), &cid(1), &Fingerprint::new("not-hex"));
    let null_owner = l.add(&Identity::null(), &cid(1), &fp(1));

    for result in [empty_id, empty_fp, bad_fp, null_owner] {
        assert!(matches!(result, Err(LedgerError::InvalidInput { .. })));
    }
    assert!(snapshot(&l).is_empty());
}

#[test]
fn test_owned_index_keeps_creation_order() {
    let mut l = ledger();
    for n in [3, 1, 2] {
        l.add(&alice(), &cid(n), &fp(n)).unwrap();
    }
    assert_eq!(l.owned_by(&alice()).unwrap(), vec![cid(3), cid(1), cid(2)]);
    assert!(l.owned_by(&bob()).unwrap().is_empty());
}

// =============================================================================
// grant / revoke / check
// =============================================================================

#[test]
fn test_grant_revoke_regrant_cycle() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();

    assert!(!l.check_access(&cid(1), &bob()).unwrap());

    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    assert!(l.check_access(&cid(1), &bob()).unwrap());

    l.revoke_access(&alice(), &cid(1), &bob()).unwrap();
    assert!(!l.check_access(&cid(1), &bob()).unwrap());

    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    assert!(l.check_access(&cid(1), &bob()).unwrap());

    // Exactly one index entry across the whole cycle
    assert_eq!(l.viewer_index(&bob()).unwrap(), vec![cid(1)]);
}

#[test]
fn test_owner_always_has_access() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    assert!(l.check_access(&cid(1), &alice()).unwrap());
    assert!(!l.check_access(&cid(9), &alice()).unwrap());
}

#[test]
fn test_grant_preconditions() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();

    assert_eq!(
        l.grant_access(&alice(), &cid(9), &bob()),
        Err(LedgerError::NotFound { id: cid(9) })
    );
    assert!(matches!(
        l.grant_access(&alice(), &cid(1), &alice()),
        Err(LedgerError::InvalidInput { .. })
    ));
    assert!(matches!(
        l.grant_access(&alice(), &cid(1), &Identity::new("0x0000000000000000000000000000000000000000")),
        Err(LedgerError::InvalidInput { .. })
    ));
    assert_eq!(
        l.grant_access(&bob(), &cid(1), &carol()),
        Err(LedgerError::Forbidden {
            caller: bob(),
            id: cid(1)
        })
    );

    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    let before = snapshot(&l);
    assert_eq!(
        l.grant_access(&alice(), &cid(1), &bob()),
        Err(LedgerError::AlreadyGranted {
            id: cid(1),
            viewer: bob()
        })
    );
    assert_eq!(snapshot(&l), before);
}

#[test]
fn test_non_owner_revoke_is_forbidden_and_grant_stays() {
    let mut l = ledger_with(GrantPolicy::OwnerOrViewer);
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    l.grant_access(&alice(), &cid(1), &carol()).unwrap();

    // Even an active viewer under the delegating policy may not revoke.
    assert_eq!(
        l.revoke_access(&carol(), &cid(1), &bob()),
        Err(LedgerError::Forbidden {
            caller: carol(),
            id: cid(1)
        })
    );
    assert!(l.check_access(&cid(1), &bob()).unwrap());
}

#[test]
fn test_revoke_without_grant() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();

    assert_eq!(
        l.revoke_access(&alice(), &cid(1), &bob()),
        Err(LedgerError::NotGranted {
            id: cid(1),
            viewer: bob()
        })
    );
    assert_eq!(
        l.revoke_access(&alice(), &cid(2), &bob()),
        Err(LedgerError::NotFound { id: cid(2) })
    );
}

#[test]
fn test_owner_only_policy_blocks_delegation() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.grant_access(&alice(), &cid(1), &bob()).unwrap();

    assert!(matches!(
        l.grant_access(&bob(), &cid(1), &carol()),
        Err(LedgerError::Forbidden { .. })
    ));
}

#[test]
fn test_delegating_policy_lets_active_viewer_grant() {
    let mut l = ledger_with(GrantPolicy::OwnerOrViewer);
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.grant_access(&alice(), &cid(1), &bob()).unwrap();

    l.grant_access(&bob(), &cid(1), &carol()).unwrap();
    assert!(l.check_access(&cid(1), &carol()).unwrap());

    // A revoked viewer loses the right to delegate.
    l.revoke_access(&alice(), &cid(1), &bob()).unwrap();
    assert!(matches!(
        l.grant_access(&bob(), &cid(1), &Identity::new("0xD00D")),
        Err(LedgerError::Forbidden { .. })
    ));

    // Delegates cannot hand access back to the owner.
    assert!(matches!(
        l.grant_access(&carol(), &cid(1), &alice()),
        Err(LedgerError::InvalidInput { .. })
    ));
}

// =============================================================================
// get_accessible / viewer index
// =============================================================================

#[test]
fn test_accessible_filters_revoked_grants() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.add(&alice(), &cid(2), &fp(2)).unwrap();
    l.add(&bob(), &cid(3), &fp(3)).unwrap();

    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    l.grant_access(&alice(), &cid(2), &bob()).unwrap();
    l.revoke_access(&alice(), &cid(1), &bob()).unwrap();

    let visible = ids(&l.get_accessible(&bob()).unwrap());
    assert_eq!(visible, vec![cid(3), cid(2)]);
    assert!(!visible.contains(&cid(1)));
}

#[test]
fn test_swap_and_pop_keeps_index_consistent() {
    let mut l = ledger();
    for n in 1..=4 {
        l.add(&alice(), &cid(n), &fp(n)).unwrap();
        l.grant_access(&alice(), &cid(n), &bob()).unwrap();
    }

    // Remove from the middle: the last slot moves into its place.
    l.revoke_access(&alice(), &cid(2), &bob()).unwrap();
    let index: BTreeSet<_> = l.viewer_index(&bob()).unwrap().into_iter().collect();
    assert_eq!(index, [cid(1), cid(3), cid(4)].into_iter().collect::<BTreeSet<_>>());

    // The moved entry must still be removable.
    l.revoke_access(&alice(), &cid(4), &bob()).unwrap();
    l.revoke_access(&alice(), &cid(1), &bob()).unwrap();
    assert_eq!(l.viewer_index(&bob()).unwrap(), vec![cid(3)]);

    l.revoke_access(&alice(), &cid(3), &bob()).unwrap();
    assert!(l.viewer_index(&bob()).unwrap().is_empty());
    assert!(l.get_accessible(&bob()).unwrap().is_empty());
}

// =============================================================================
// audit trail
// =============================================================================

#[test]
fn test_history_reconstructs_sharing() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.add(&alice(), &cid(2), &fp(2)).unwrap();
    l.grant_access(&alice(), &cid(1), &bob()).unwrap();
    l.revoke_access(&alice(), &cid(1), &bob()).unwrap();

    let history = l.history(&cid(1)).unwrap();
    let names: Vec<_> = history.iter().map(|e| e.event.name()).collect();
    assert_eq!(names, vec!["RecordAdded", "AccessGranted", "AccessRevoked"]);

    let sequences: Vec<_> = history.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 3, 4]);
    assert!(history.iter().all(|e| e.timestamp == NOW));

    match &history[1].event {
        LedgerEvent::AccessGranted {
            granted_by, viewer, ..
        } => {
            assert_eq!(*granted_by, alice());
            assert_eq!(*viewer, bob());
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_failed_precondition_emits_no_event() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    let _ = l.grant_access(&bob(), &cid(1), &carol());
    let _ = l.add(&alice(), &cid(1), &fp(1));

    assert_eq!(l.events_since(0).unwrap().len(), 1);
}

#[test]
fn test_events_since() {
    let mut l = ledger();
    l.add(&alice(), &cid(1), &fp(1)).unwrap();
    l.add(&alice(), &cid(2), &fp(2)).unwrap();
    l.grant_access(&alice(), &cid(2), &bob()).unwrap();

    let tail = l.events_since(1).unwrap();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].sequence, 2);
    assert!(l.events_since(3).unwrap().is_empty());
}

// =============================================================================
// atomicity
// =============================================================================

/// Store whose commits can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryKVStore,
    fail_writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        if self.fail_writes {
            return Err(KVStoreError::IOError {
                message: "disk unplugged".to_string(),
            });
        }
        self.inner.atomic_batch_write(operations)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.inner.prefix_scan(prefix)
    }
}

#[test]
fn test_file_ledger_cannot_be_opened_twice() {
    use crate::adapters::FileBackedKVStore;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let open = || FileBackedKVStore::open(&path);

    let mut first = Ledger::new(open().unwrap(), FixedTimeSource(NOW), GrantPolicy::OwnerOnly);
    first.add(&alice(), &cid(1), &fp(1)).unwrap();

    // Locked while `first` is open.
    assert!(matches!(open(), Err(KVStoreError::AlreadyLocked { .. })));
    drop(first);

    let mut second = Ledger::new(open().unwrap(), FixedTimeSource(NOW), GrantPolicy::OwnerOnly);
    assert_eq!(
        second.add(&bob(), &cid(1), &fp(2)),
        Err(LedgerError::DuplicateId { id: cid(1) })
    );
    assert_eq!(second.get_record(&cid(1)).unwrap().unwrap().owner, alice());
}

#[test]
fn test_failed_commit_surfaces_storage_error() {
    let mut l = Ledger::new(FlakyStore::default(), FixedTimeSource(NOW), GrantPolicy::OwnerOnly);
    l.add(&alice(), &cid(1), &fp(1)).unwrap();

    l.kv_store.fail_writes = true;
    let err = l.grant_access(&alice(), &cid(1), &bob()).unwrap_err();
    assert!(matches!(err, LedgerError::Storage { .. }));

    l.kv_store.fail_writes = false;
    assert!(!l.check_access(&cid(1), &bob()).unwrap());
    assert!(l.viewer_index(&bob()).unwrap().is_empty());
    assert_eq!(l.events_since(0).unwrap().len(), 1);
}

// =============================================================================
// properties
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Grant(u8, u8),
    Revoke(u8, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u8..3).prop_map(|(i, v)| Op::Grant(i, v)),
        (0u8..4, 0u8..3).prop_map(|(i, v)| Op::Revoke(i, v)),
    ]
}

fn viewer(n: u8) -> Identity {
    Identity::new(format!("0xbee{}", n))
}

proptest! {
    #[test]
    fn prop_index_and_access_match_grant_model(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut l = ledger();
        for n in 0..4 {
            l.add(&alice(), &cid(n), &fp(n)).unwrap();
        }

        let mut model: BTreeSet<(u8, u8)> = BTreeSet::new();
        for op in ops {
            match op {
                Op::Grant(i, v) => {
                    let r = l.grant_access(&alice(), &cid(i), &viewer(v));
                    prop_assert_eq!(r.is_ok(), model.insert((i, v)));
                }
                Op::Revoke(i, v) => {
                    let r = l.revoke_access(&alice(), &cid(i), &viewer(v));
                    prop_assert_eq!(r.is_ok(), model.remove(&(i, v)));
                }
            }
        }

        for v in 0..3 {
            let expected: BTreeSet<ContentId> = model
                .iter()
                .filter(|(_, mv)| *mv == v)
                .map(|(i, _)| cid(*i))
                .collect();

            let index = l.viewer_index(&viewer(v)).unwrap();
            let index_set: BTreeSet<ContentId> = index.iter().cloned().collect();
            prop_assert_eq!(index.len(), index_set.len());
            prop_assert_eq!(&index_set, &expected);

            let visible: BTreeSet<ContentId> =
                ids(&l.get_accessible(&viewer(v)).unwrap()).into_iter().collect();
            prop_assert_eq!(&visible, &expected);

            for i in 0..4 {
                prop_assert_eq!(
                    l.check_access(&cid(i), &viewer(v)).unwrap(),
                    expected.contains(&cid(i))
                );
            }
        }
    }
}
