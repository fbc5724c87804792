//! # Node Runtime Library
//!
//! Wires the provenance subsystems into a node and exposes its services.
//! The main entry point is the `provenance-node` binary.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and subsystem wiring
//! - `adapters/` - content store implementations
//! - `pipeline` - consensus-gated write path
//! - `library` - verified read path
//! - `access` - grants, revocations, audit trail
//! - `status` - one human-readable line per outcome
//! - `cli` - command-line surface

#![allow(clippy::type_complexity)]

pub mod access;
pub mod adapters;
pub mod cli;
pub mod container;
pub mod library;
pub mod pipeline;
pub mod status;

pub use access::AccessService;
pub use container::{ContainerError, NodeConfig, NodeContainer, SharedLedger};
pub use library::LibraryReader;
pub use pipeline::{SubmissionError, SubmissionPipeline, SubmissionReceipt};
pub use status::UserStatus;
