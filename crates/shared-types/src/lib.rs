//! # Shared Types Crate
//!
//! This crate contains the identifiers and port traits shared by every
//! provenance subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Validated at the boundary**: `Identity`, `ContentId` and `Fingerprint`
//!   are checked once on construction and passed around by value afterwards.
//! - **External collaborators are ports**: the content store is consumed
//!   through the `ContentStore` trait, never through a concrete client.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::*;
pub use errors::*;
pub use ports::*;
