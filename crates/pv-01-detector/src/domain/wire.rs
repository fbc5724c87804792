//! Response decoding
//!
//! Decoded once at the HTTP boundary into a `Vote`; nothing downstream sees JSON.

use super::{DetectorError, Verdict, Vote};
use serde::Deserialize;

/// Successful node response body.
#[derive(Debug, Deserialize)]
struct PredictionBody {
    is_deepfake: bool,
    confidence: f64,
}

/// Failure body returned with 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decode a 2xx response body into a vote.
pub fn parse_vote(body: &[u8]) -> Result<Vote, DetectorError> {
    let parsed: PredictionBody =
        serde_json::from_slice(body).map_err(|e| DetectorError::InvalidResponse {
            endpoint: String::new(),
            reason: format!("malformed body: {}", e),
        })?;

    Vote::new(Verdict::from_is_deepfake(parsed.is_deepfake), parsed.confidence)
}

/// Describe a non-2xx response, preferring the node's own error message.
pub fn describe_failure(status: u16, body: &[u8]) -> DetectorError {
    let reason = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => format!("HTTP {}: {}", status, error),
        Err(_) => format!("HTTP {}", status),
    };
    DetectorError::InvalidResponse {
        endpoint: String::new(),
        reason,
    }
}
