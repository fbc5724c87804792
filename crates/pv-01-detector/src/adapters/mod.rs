//! Adapters
//!
//! - http: reqwest-backed client for detector nodes

mod http;

pub use http::HttpDetectorClient;
