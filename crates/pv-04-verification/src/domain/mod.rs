//! Domain layer for the Verification subsystem

mod status;

pub use status::*;
