//! # Ledger Subsystem (pv-03)
//!
//! The system of record: immutable ownership records plus a revocable,
//! per-item access relation, all in one key-value store.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique ids | A second `add` of an id fails, never overwrites |
//! | Immutable owner | Set once at creation |
//! | Implicit owner access | The owner is never in the grant relation |
//! | Authoritative grants | The viewer index is a hint, always filtered by grant state |
//! | Atomic mutations | Each mutation is one batch: all or nothing |
//! | Append-only audit | One event per successful mutation, ordered by sequence |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - entities, events, key layout, errors
//! - `ports/` - `LedgerApi` (inbound), `KeyValueStore` (outbound)
//! - `adapters/` - in-memory and file-backed stores
//! - `service/` - `Ledger`, implementing `LedgerApi`
//!
//! ## Usage
//!
//! ```ignore
//! use pv_03_ledger::{FileBackedKVStore, GrantPolicy, Ledger, LedgerApi};
//! use shared_types::SystemTimeSource;
//!
//! let store = FileBackedKVStore::open("data/ledger.db")?;
//! let mut ledger = Ledger::new(store, SystemTimeSource, GrantPolicy::OwnerOnly);
//! ledger.add(&owner, &content_id, &fingerprint)?;
//! ledger.grant_access(&owner, &content_id, &viewer)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
pub use domain::{
    GrantPolicy, KVStoreError, KeyPrefix, LedgerError, LedgerEvent, LedgerResult, Record,
    SequencedEvent,
};
pub use ports::{BatchOperation, KeyValueStore, LedgerApi, ScanResult};
pub use service::Ledger;
