//! # Key Layout
//!
//! All keys are prefixed to namespace different data types. Composite
//! keys encode each component as `[len:u32 BE][bytes]`, so one component
//! can never run into the next.

use shared_types::{ContentId, Identity};

#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Record: `r:{id}` -> Record
    Record,
    /// Owner index: `o:{owner}{seq}` -> id
    Owned,
    /// Viewer index slot: `v:{viewer}{index}` -> id
    ViewerSlot,
    /// Viewer index position: `p:{viewer}{id}` -> index + 1
    ViewerPosition,
    /// Grant relation: `g:{id}{viewer}` -> active flag
    Grant,
    /// Audit event: `e:{sequence}` -> SequencedEvent
    Event,
    /// Counters: `m:{name}{...}` -> u64
    Metadata,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Record => b"r:",
            KeyPrefix::Owned => b"o:",
            KeyPrefix::ViewerSlot => b"v:",
            KeyPrefix::ViewerPosition => b"p:",
            KeyPrefix::Grant => b"g:",
            KeyPrefix::Event => b"e:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    /// Build a key from length-prefixed components.
    pub fn key(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        for part in parts {
            push_component(&mut key, part);
        }
        key
    }

    pub fn record_key(id: &ContentId) -> Vec<u8> {
        KeyPrefix::Record.key(&[id.as_str().as_bytes()])
    }

    /// Scan prefix for everything `owner` owns.
    pub fn owned_prefix(owner: &Identity) -> Vec<u8> {
        KeyPrefix::Owned.key(&[owner.as_str().as_bytes()])
    }

    pub fn owned_key(owner: &Identity, seq: u64) -> Vec<u8> {
        let mut key = Self::owned_prefix(owner);
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }

    /// Scan prefix for `viewer`'s index slots.
    pub fn viewer_slot_prefix(viewer: &Identity) -> Vec<u8> {
        KeyPrefix::ViewerSlot.key(&[viewer.as_str().as_bytes()])
    }

    pub fn viewer_slot_key(viewer: &Identity, index: u64) -> Vec<u8> {
        let mut key = Self::viewer_slot_prefix(viewer);
        key.extend_from_slice(&index.to_be_bytes());
        key
    }

    pub fn viewer_position_key(viewer: &Identity, id: &ContentId) -> Vec<u8> {
        KeyPrefix::ViewerPosition.key(&[viewer.as_str().as_bytes(), id.as_str().as_bytes()])
    }

    pub fn grant_key(id: &ContentId, viewer: &Identity) -> Vec<u8> {
        KeyPrefix::Grant.key(&[id.as_str().as_bytes(), viewer.as_str().as_bytes()])
    }

    pub fn event_key(sequence: u64) -> Vec<u8> {
        let mut key = Self::event_prefix();
        key.extend_from_slice(&sequence.to_be_bytes());
        key
    }

    pub fn event_prefix() -> Vec<u8> {
        KeyPrefix::Event.as_bytes().to_vec()
    }

    /// Sequence of the most recent event.
    pub fn last_sequence_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(&[&b"last_sequence"[..]])
    }

    /// Next owner-index slot for `owner`.
    pub fn owned_count_key(owner: &Identity) -> Vec<u8> {
        KeyPrefix::Metadata.key(&[&b"owned_count"[..], owner.as_str().as_bytes()])
    }

    /// Length of `viewer`'s viewer index.
    pub fn viewer_len_key(viewer: &Identity) -> Vec<u8> {
        KeyPrefix::Metadata.key(&[&b"viewer_len"[..], viewer.as_str().as_bytes()])
    }
}

fn push_component(key: &mut Vec<u8>, part: &[u8]) {
    key.extend_from_slice(&(part.len() as u32).to_be_bytes());
    key.extend_from_slice(part);
}

/// Encode a counter value.
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Decode a counter value; `None` for malformed bytes.
pub fn decode_u64(bytes: &[u8]) -> Option<u64> {
    bytes.try_into().ok().map(u64::from_be_bytes)
}
