//! Access management over the shared ledger.

use crate::container::SharedLedger;
use pv_03_ledger::{LedgerResult, SequencedEvent};
use shared_types::{ContentId, Identity};
use tracing::debug;

#[derive(Clone)]
pub struct AccessService {
    ledger: SharedLedger,
}

impl AccessService {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    pub fn grant(&self, caller: &Identity, id: &ContentId, viewer: &Identity) -> LedgerResult<()> {
        debug!(%caller, %id, %viewer, "grant requested");
        self.ledger.write().grant_access(caller, id, viewer)
    }

    pub fn revoke(&self, caller: &Identity, id: &ContentId, viewer: &Identity) -> LedgerResult<()> {
        debug!(%caller, %id, %viewer, "revoke requested");
        self.ledger.write().revoke_access(caller, id, viewer)
    }

    pub fn check(&self, id: &ContentId, identity: &Identity) -> LedgerResult<bool> {
        self.ledger.read().check_access(id, identity)
    }

    /// Who shared `id`, with whom, and when.
    pub fn history(&self, id: &ContentId) -> LedgerResult<Vec<SequencedEvent>> {
        self.ledger.read().history(id)
    }

    pub fn owned(&self, owner: &Identity) -> LedgerResult<Vec<ContentId>> {
        self.ledger.read().owned_by(owner)
    }
}
