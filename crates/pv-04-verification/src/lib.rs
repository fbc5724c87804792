//! # Verification Subsystem (pv-04)
//!
//! Tamper-evident read path: content fetched back from the content store is
//! re-hashed and compared with the fingerprint the ledger anchored.
//!
//! | Fetched | Hash | Status |
//! |---------|------|--------|
//! | error or empty | - | `Error` |
//! | bytes | matches | `Verified` |
//! | bytes | differs | `Mismatch` |

pub mod domain;
pub mod service;

pub use domain::{VerificationReport, VerificationStatus};
pub use service::VerificationEngine;
