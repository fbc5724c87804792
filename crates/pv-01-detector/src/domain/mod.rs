//! Domain layer for the Detector subsystem
//!
//! - vote: verdicts and their confidence
//! - request: what is sent to a node
//! - wire: response decoding at the HTTP boundary

mod error;
mod request;
mod vote;
mod wire;

pub use error::*;
pub use request::*;
pub use vote::*;
pub use wire::*;
