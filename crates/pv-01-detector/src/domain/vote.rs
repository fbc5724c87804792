//! Votes produced by detector nodes

use super::DetectorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a single node believes about the submitted media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Authentic media.
    Real,
    /// Deepfake detected.
    Fake,
}

impl Verdict {
    /// Map the node's `is_deepfake` flag.
    pub fn from_is_deepfake(is_deepfake: bool) -> Self {
        if is_deepfake {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Real => f.write_str("real"),
            Verdict::Fake => f.write_str("fake"),
        }
    }
}

/// One node's verdict for one submission. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub verdict: Verdict,
    /// Confidence in the verdict, within `[0, 1]`.
    pub confidence: f64,
}

impl Vote {
    /// Create a vote, rejecting non-finite or out-of-range confidence.
    pub fn new(verdict: Verdict, confidence: f64) -> Result<Self, DetectorError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(DetectorError::InvalidResponse {
                endpoint: String::new(),
                reason: format!("confidence {} outside [0, 1]", confidence),
            });
        }
        Ok(Self {
            verdict,
            confidence,
        })
    }

    pub fn real(confidence: f64) -> Result<Self, DetectorError> {
        Self::new(Verdict::Real, confidence)
    }

    pub fn fake(confidence: f64) -> Result<Self, DetectorError> {
        Self::new(Verdict::Fake, confidence)
    }
}
