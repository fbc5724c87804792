//! # Core Domain Entities
//!
//! Identifiers shared by the detector, consensus, ledger and verification
//! subsystems.
//!
//! - `Identity`: who submits, owns or views an item
//! - `ContentId`: where the content store keeps the bytes
//! - `Fingerprint`: what the bytes hash to (tamper detection)

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// A 32-byte digest.
pub type Hash256 = [u8; 32];

/// An opaque caller identity, typically a wallet address.
///
/// `0x`-prefixed addresses are case-insensitive and normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Identity(String);

impl Identity {
    /// Create an identity, trimming whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if is_hex_address(trimmed) {
            Self(trimmed.to_ascii_lowercase())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The null identity: empty, or the all-zero address.
    pub fn null() -> Self {
        Self(String::new())
    }

    /// True for the empty identity and for `0x000...0`.
    pub fn is_null(&self) -> bool {
        if self.0.is_empty() {
            return true;
        }
        match self.0.strip_prefix("0x") {
            Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b == b'0'),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn is_hex_address(value: &str) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Content-store identifier (e.g. an IPFS-style CID).
///
/// Content-derived, so two uploads of the same bytes map to the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Create a content id, rejecting empty input.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let id = Self::new(value);
        if id.is_empty() {
            return Err(TypeError::EmptyContentId);
        }
        Ok(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Lowercase hex rendering of a 256-bit content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of a rendered 256-bit digest.
    pub const HEX_LEN: usize = 64;

    /// Wrap a rendering as-is (trimmed, lowercased). Use `parse` for untrusted input.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_ascii_lowercase())
    }

    /// Render raw digest bytes.
    pub fn from_digest(digest: &Hash256) -> Self {
        Self(hex::encode(digest))
    }

    /// Parse untrusted input, rejecting empty and non-hex renderings.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let fp = Self::new(value);
        if fp.is_empty() {
            return Err(TypeError::InvalidFingerprint {
                reason: "empty".to_string(),
            });
        }
        if !fp.is_well_formed() {
            return Err(TypeError::InvalidFingerprint {
                reason: format!("not a hex digest: {}", value.trim()),
            });
        }
        Ok(fp)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty, even length, hex digits only.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() % 2 == 0
            && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Case-insensitive comparison against another rendering.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
