//! Ports for the Consensus subsystem
//!
//! The outbound dependency is `pv_01_detector::DetectorApi`.

mod inbound;

pub use inbound::*;
