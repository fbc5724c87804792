//! # Ledger Entities

use serde::{Deserialize, Serialize};
use shared_types::{ContentId, Fingerprint, Identity, Timestamp};
use std::fmt;
use std::str::FromStr;

/// An immutable ownership record.
///
/// Created once on an accepted submission, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: ContentId,
    pub fingerprint: Fingerprint,
    pub owner: Identity,
    pub created_at: Timestamp,
}

/// Who may call `grant_access`.
///
/// Revocation is owner-only under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrantPolicy {
    /// Only the record owner grants.
    #[default]
    OwnerOnly,
    /// The owner or any identity currently holding an active grant.
    OwnerOrViewer,
}

impl GrantPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantPolicy::OwnerOnly => "owner-only",
            GrantPolicy::OwnerOrViewer => "owner-or-viewer",
        }
    }
}

impl fmt::Display for GrantPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner-only" | "owner_only" | "owner" => Ok(GrantPolicy::OwnerOnly),
            "owner-or-viewer" | "owner_or_viewer" | "delegate" => Ok(GrantPolicy::OwnerOrViewer),
            other => Err(format!("unknown grant policy '{}'", other)),
        }
    }
}
