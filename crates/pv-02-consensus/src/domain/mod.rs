//! Domain layer for the Consensus subsystem
//!
//! - config: threshold, node timeout, endpoint set
//! - outcome: the decision and its supporting figures
//! - tally: the pure decision rule over valid votes

mod config;
mod error;
mod outcome;
mod tally;

pub use config::*;
pub use error::*;
pub use outcome::*;
pub use tally::*;
