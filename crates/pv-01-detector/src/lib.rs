//! # pv-01-detector
//!
//! Detector client subsystem: one request to one authenticity-detector node.
//!
//! ## Architecture
//!
//! - `domain/` - `Vote`, `Verdict`, `DetectionRequest`, `DetectorError`, wire parsing
//! - `ports/` - `DetectorApi`, the seam the consensus coordinator fans out over
//! - `adapters/` - `HttpDetectorClient` (multipart POST via reqwest)
//!
//! ## Node Contract
//!
//! ```text
//! POST {endpoint}   multipart/form-data, part "file" = raw bytes
//!   200 → {"is_deepfake": bool, "confidence": 0.0..=1.0}
//!   4xx/5xx → {"error": "..."}
//! ```
//!
//! A single call never retries. Timeout expiry drops the in-flight request,
//! cancelling only that node's work.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pv_01_detector::{DetectionRequest, DetectorApi, HttpDetectorClient};
//!
//! let client = HttpDetectorClient::new()?;
//! let request = DetectionRequest::new(bytes, "clip.mp4");
//! let vote = client
//!     .query("http://127.0.0.1:5001/predict", &request, Duration::from_secs(30))
//!     .await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::HttpDetectorClient;
pub use domain::{
    parse_vote, DetectionRequest, DetectorError, FailureKind, MediaKind, Verdict, Vote,
};
pub use ports::DetectorApi;
