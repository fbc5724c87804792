//! # Domain Layer
//!
//! - entities: `Record`, `GrantPolicy`
//! - events: audit log entries
//! - keys: key-value layout
//! - errors: `LedgerError`, `KVStoreError`

pub mod entities;
pub mod errors;
pub mod events;
pub mod keys;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use keys::KeyPrefix;
