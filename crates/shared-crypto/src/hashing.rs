//! # Content Hashing
//!
//! SHA-256 fingerprints for tamper detection and BLAKE3 digests for content
//! addressing. Both paths are pure: no I/O, no shared state.

use crate::errors::HashError;
use sha2::{Digest, Sha256};
use shared_types::{ContentId, Fingerprint, Hash256};

/// Prefix marking a BLAKE3-derived content id.
pub const CONTENT_ID_PREFIX: &str = "b3";

/// Deterministic content fingerprinting used by the commit and verify paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashEngine;

impl HashEngine {
    /// Fingerprint the given bytes.
    ///
    /// Fails with [`HashError::EmptyInput`] on zero-length input.
    pub fn compute(bytes: &[u8]) -> Result<Fingerprint, HashError> {
        let mut hasher = Sha256Hasher::new();
        hasher.update(bytes);
        hasher.finalize()
    }
}

/// Stateful SHA-256 hasher for content that arrives in chunks.
pub struct Sha256Hasher {
    inner: Sha256,
    bytes_seen: u64,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
            bytes_seen: 0,
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self.bytes_seen += data.len() as u64;
        self
    }

    /// Number of bytes hashed so far.
    pub fn bytes_seen(&self) -> u64 {
        self.bytes_seen
    }

    /// Finalize into a fingerprint. Empty streams are rejected like `compute`.
    pub fn finalize(self) -> Result<Fingerprint, HashError> {
        if self.bytes_seen == 0 {
            return Err(HashError::EmptyInput);
        }
        let digest: Hash256 = self.inner.finalize().into();
        Ok(Fingerprint::from_digest(&digest))
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256_hash(data: &[u8]) -> Hash256 {
    Sha256::digest(data).into()
}

/// Derive a content-addressed identifier with BLAKE3.
pub fn blake3_content_id(data: &[u8]) -> ContentId {
    let digest = blake3::hash(data);
    ContentId::new(format!("{}{}", CONTENT_ID_PREFIX, digest.to_hex()))
}
