//! # Shared Ports
//!
//! Driven ports consumed by more than one subsystem.

use crate::entities::{ContentId, Timestamp};
use crate::errors::ContentStoreError;
use async_trait::async_trait;

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Fixed clock for tests and replay tooling.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedTimeSource(pub Timestamp);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Content store contract (pinning service / gateway).
///
/// Only the contract is defined here; replication and durability are the
/// store's concern.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Pin the bytes and return their content-derived identifier.
    async fn pin(&self, bytes: &[u8]) -> Result<ContentId, ContentStoreError>;

    /// Fetch previously pinned bytes.
    async fn fetch(&self, id: &ContentId) -> Result<Vec<u8>, ContentStoreError>;
}
