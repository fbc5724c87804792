//! # Inbound Ports (Driving Ports)

use crate::domain::{LedgerResult, Record, SequencedEvent};
use shared_types::{ContentId, Fingerprint, Identity};

/// Primary Ledger API.
///
/// Mutations take `&mut self`: the ledger applies one mutation at a time
/// and each one commits as a single atomic batch. Reads see the latest
/// committed state.
pub trait LedgerApi: Send + Sync {
    /// Create an immutable record owned by `caller`.
    fn add(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        fingerprint: &Fingerprint,
    ) -> LedgerResult<Record>;

    /// Activate `(id, viewer)`.
    fn grant_access(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        viewer: &Identity,
    ) -> LedgerResult<()>;

    /// Deactivate `(id, viewer)`. Owner-only.
    fn revoke_access(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        viewer: &Identity,
    ) -> LedgerResult<()>;

    /// Owned records followed by actively granted ones, no duplicates.
    fn get_accessible(&self, caller: &Identity) -> LedgerResult<Vec<Record>>;

    /// True iff `identity` owns `id` or holds an active grant on it.
    fn check_access(&self, id: &ContentId, identity: &Identity) -> LedgerResult<bool>;

    fn get_record(&self, id: &ContentId) -> LedgerResult<Option<Record>>;

    /// Ids owned by `owner`, in creation order.
    fn owned_by(&self, owner: &Identity) -> LedgerResult<Vec<ContentId>>;

    /// Raw viewer index: an unordered enumeration hint, not an access answer.
    fn viewer_index(&self, viewer: &Identity) -> LedgerResult<Vec<ContentId>>;

    /// Audit trail for one record in commit order.
    fn history(&self, id: &ContentId) -> LedgerResult<Vec<SequencedEvent>>;

    /// Events with `sequence > after`, in commit order.
    fn events_since(&self, after: u64) -> LedgerResult<Vec<SequencedEvent>>;
}
