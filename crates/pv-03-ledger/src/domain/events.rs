//! # Audit Events
//!
//! Append-only log of ledger mutations. Each event is stored under its
//! commit sequence, so filtering by id and sorting by sequence answers
//! "who shared this item, with whom, and when".

use serde::{Deserialize, Serialize};
use shared_types::{ContentId, Fingerprint, Identity, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    RecordAdded {
        owner: Identity,
        id: ContentId,
        fingerprint: Fingerprint,
        timestamp: Timestamp,
    },
    AccessGranted {
        id: ContentId,
        /// The owner, or a delegating viewer under `GrantPolicy::OwnerOrViewer`
        granted_by: Identity,
        viewer: Identity,
    },
    AccessRevoked {
        id: ContentId,
        owner: Identity,
        viewer: Identity,
    },
}

impl LedgerEvent {
    /// The record this event concerns.
    pub fn id(&self) -> &ContentId {
        match self {
            LedgerEvent::RecordAdded { id, .. }
            | LedgerEvent::AccessGranted { id, .. }
            | LedgerEvent::AccessRevoked { id, .. } => id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::RecordAdded { .. } => "RecordAdded",
            LedgerEvent::AccessGranted { .. } => "AccessGranted",
            LedgerEvent::AccessRevoked { .. } => "AccessRevoked",
        }
    }
}

/// An event as committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Commit order, starting at 1
    pub sequence: u64,
    pub timestamp: Timestamp,
    pub event: LedgerEvent,
}
