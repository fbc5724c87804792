//! Ports for the Detector subsystem

mod inbound;

pub use inbound::*;
