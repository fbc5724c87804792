//! # Ledger Service
//!
//! Record store plus per-item access control over a `KeyValueStore`.
//!
//! ## Mutation discipline
//!
//! 1. Check every precondition against committed state
//! 2. Build one batch: record/index/grant keys plus the audit event
//! 3. Commit the batch once
//!
//! A failed precondition writes nothing; a failed commit writes nothing.
//!
//! ## Viewer index
//!
//! `v:{viewer}{i}` holds the ids a viewer was granted, `p:{viewer}{id}`
//! holds `i + 1` (absent = not indexed). Revoke removes by swap-and-pop, so
//! the index is unordered. Reads always filter it by the grant relation.

#[cfg(test)]
mod tests;

use crate::domain::keys::{decode_u64, encode_u64};
use crate::domain::{
    GrantPolicy, KeyPrefix, LedgerError, LedgerEvent, LedgerResult, Record, SequencedEvent,
};
use crate::ports::inbound::LedgerApi;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::{ContentId, Fingerprint, Identity, TimeSource};
use std::collections::HashSet;
use tracing::{debug, info};

const GRANT_ACTIVE: &[u8] = &[1];
const GRANT_INACTIVE: &[u8] = &[0];

/// The Ledger.
pub struct Ledger<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    kv_store: KV,
    time_source: TS,
    policy: GrantPolicy,
}

impl<KV, TS> Ledger<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    pub fn new(kv_store: KV, time_source: TS, policy: GrantPolicy) -> Self {
        Self {
            kv_store,
            time_source,
            policy,
        }
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }

    fn commit(&mut self, batch: Vec<BatchOperation>) -> LedgerResult<()> {
        debug!(ops = batch.len(), "[pv-03] committing batch");
        self.kv_store.atomic_batch_write(batch)?;
        Ok(())
    }

    fn read_counter(&self, key: &[u8]) -> LedgerResult<u64> {
        match self.kv_store.get(key)? {
            None => Ok(0),
            Some(bytes) => decode_u64(&bytes).ok_or_else(|| corrupt("counter")),
        }
    }

    fn load_record(&self, id: &ContentId) -> LedgerResult<Option<Record>> {
        match self.kv_store.get(&KeyPrefix::record_key(id))? {
            None => Ok(None),
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
        }
    }

    fn require_record(&self, id: &ContentId) -> LedgerResult<Record> {
        self.load_record(id)?
            .ok_or_else(|| LedgerError::NotFound { id: id.clone() })
    }

    fn is_granted(&self, id: &ContentId, viewer: &Identity) -> LedgerResult<bool> {
        let flag = self.kv_store.get(&KeyPrefix::grant_key(id, viewer))?;
        Ok(flag.as_deref() == Some(GRANT_ACTIVE))
    }

    /// Append the audit event to `batch`; returns its sequence.
    fn push_event(&self, batch: &mut Vec<BatchOperation>, event: LedgerEvent) -> LedgerResult<u64> {
        let sequence = self.read_counter(&KeyPrefix::last_sequence_key())? + 1;
        let entry = SequencedEvent {
            sequence,
            timestamp: self.time_source.now(),
            event,
        };
        batch.push(BatchOperation::put(
            KeyPrefix::event_key(sequence),
            bincode::serialize(&entry)?,
        ));
        batch.push(BatchOperation::put(
            KeyPrefix::last_sequence_key(),
            encode_u64(sequence),
        ));
        Ok(sequence)
    }

    /// Append `id` to the viewer index unless it is already there.
    fn push_viewer_slot(
        &self,
        batch: &mut Vec<BatchOperation>,
        viewer: &Identity,
        id: &ContentId,
    ) -> LedgerResult<()> {
        let position_key = KeyPrefix::viewer_position_key(viewer, id);
        if self.kv_store.exists(&position_key)? {
            return Ok(());
        }

        let len_key = KeyPrefix::viewer_len_key(viewer);
        let len = self.read_counter(&len_key)?;
        batch.push(BatchOperation::put(
            KeyPrefix::viewer_slot_key(viewer, len),
            id.as_str().as_bytes().to_vec(),
        ));
        batch.push(BatchOperation::put(position_key, encode_u64(len + 1)));
        batch.push(BatchOperation::put(len_key, encode_u64(len + 1)));
        Ok(())
    }

    /// Swap-and-pop `id` out of the viewer index.
    fn pop_viewer_slot(
        &self,
        batch: &mut Vec<BatchOperation>,
        viewer: &Identity,
        id: &ContentId,
    ) -> LedgerResult<()> {
        let position_key = KeyPrefix::viewer_position_key(viewer, id);
        let Some(raw) = self.kv_store.get(&position_key)? else {
            return Ok(());
        };
        let index = decode_u64(&raw)
            .and_then(|p| p.checked_sub(1))
            .ok_or_else(|| corrupt("viewer position"))?;

        let len_key = KeyPrefix::viewer_len_key(viewer);
        let last = self
            .read_counter(&len_key)?
            .checked_sub(1)
            .ok_or_else(|| corrupt("viewer index length"))?;

        if index != last {
            let moved = self
                .kv_store
                .get(&KeyPrefix::viewer_slot_key(viewer, last))?
                .ok_or_else(|| corrupt("viewer slot"))?;
            let moved_id = decode_id(&moved)?;
            batch.push(BatchOperation::put(
                KeyPrefix::viewer_position_key(viewer, &moved_id),
                encode_u64(index + 1),
            ));
            batch.push(BatchOperation::put(
                KeyPrefix::viewer_slot_key(viewer, index),
                moved,
            ));
        }

        batch.push(BatchOperation::delete(KeyPrefix::viewer_slot_key(viewer, last)));
        batch.push(BatchOperation::delete(position_key));
        batch.push(BatchOperation::put(len_key, encode_u64(last)));
        Ok(())
    }

    fn scan_events(&self) -> LedgerResult<Vec<SequencedEvent>> {
        self.kv_store
            .prefix_scan(&KeyPrefix::event_prefix())?
            .into_iter()
            .map(|(_, bytes)| bincode::deserialize(&bytes).map_err(LedgerError::from))
            .collect()
    }
}

impl<KV, TS> LedgerApi for Ledger<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    fn add(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        fingerprint: &Fingerprint,
    ) -> LedgerResult<Record> {
        if caller.is_null() {
            return Err(LedgerError::invalid("owner is the null identity"));
        }
        if id.is_empty() {
            return Err(LedgerError::invalid("empty content id"));
        }
        if fingerprint.is_empty() {
            return Err(LedgerError::invalid("empty fingerprint"));
        }
        if !fingerprint.is_well_formed() {
            return Err(LedgerError::invalid("fingerprint is not a hex digest"));
        }

        let record_key = KeyPrefix::record_key(id);
        if self.kv_store.exists(&record_key)? {
            return Err(LedgerError::DuplicateId { id: id.clone() });
        }

        let record = Record {
            id: id.clone(),
            fingerprint: fingerprint.clone(),
            owner: caller.clone(),
            created_at: self.time_source.now(),
        };

        let owned_count_key = KeyPrefix::owned_count_key(caller);
        let slot = self.read_counter(&owned_count_key)?;

        let mut batch = vec![
            BatchOperation::put(record_key, bincode::serialize(&record)?),
            BatchOperation::put(
                KeyPrefix::owned_key(caller, slot),
                id.as_str().as_bytes().to_vec(),
            ),
            BatchOperation::put(owned_count_key, encode_u64(slot + 1)),
        ];
        let sequence = self.push_event(
            &mut batch,
            LedgerEvent::RecordAdded {
                owner: caller.clone(),
                id: id.clone(),
                fingerprint: fingerprint.clone(),
                timestamp: record.created_at,
            },
        )?;
        self.commit(batch)?;

        info!(
            id = %id,
            owner = %caller,
            fingerprint = %fingerprint,
            sequence,
            "[pv-03] record added"
        );
        Ok(record)
    }

    fn grant_access(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        viewer: &Identity,
    ) -> LedgerResult<()> {
        let record = self.require_record(id)?;

        if viewer.is_null() {
            return Err(LedgerError::invalid("viewer is the null identity"));
        }
        if viewer == caller {
            return Err(LedgerError::invalid("cannot grant access to yourself"));
        }
        if *viewer == record.owner {
            return Err(LedgerError::invalid("the owner always has access"));
        }

        let authorized = *caller == record.owner
            || (self.policy == GrantPolicy::OwnerOrViewer && self.is_granted(id, caller)?);
        if !authorized {
            return Err(LedgerError::Forbidden {
                caller: caller.clone(),
                id: id.clone(),
            });
        }

        if self.is_granted(id, viewer)? {
            return Err(LedgerError::AlreadyGranted {
                id: id.clone(),
                viewer: viewer.clone(),
            });
        }

        let mut batch = vec![BatchOperation::put(
            KeyPrefix::grant_key(id, viewer),
            GRANT_ACTIVE.to_vec(),
        )];
        self.push_viewer_slot(&mut batch, viewer, id)?;
        let sequence = self.push_event(
            &mut batch,
            LedgerEvent::AccessGranted {
                id: id.clone(),
                granted_by: caller.clone(),
                viewer: viewer.clone(),
            },
        )?;
        self.commit(batch)?;

        info!(id = %id, by = %caller, viewer = %viewer, sequence, "[pv-03] access granted");
        Ok(())
    }

    fn revoke_access(
        &mut self,
        caller: &Identity,
        id: &ContentId,
        viewer: &Identity,
    ) -> LedgerResult<()> {
        let record = self.require_record(id)?;

        if *caller != record.owner {
            return Err(LedgerError::Forbidden {
                caller: caller.clone(),
                id: id.clone(),
            });
        }
        if !self.is_granted(id, viewer)? {
            return Err(LedgerError::NotGranted {
                id: id.clone(),
                viewer: viewer.clone(),
            });
        }

        let mut batch = vec![BatchOperation::put(
            KeyPrefix::grant_key(id, viewer),
            GRANT_INACTIVE.to_vec(),
        )];
        self.pop_viewer_slot(&mut batch, viewer, id)?;
        let sequence = self.push_event(
            &mut batch,
            LedgerEvent::AccessRevoked {
                id: id.clone(),
                owner: caller.clone(),
                viewer: viewer.clone(),
            },
        )?;
        self.commit(batch)?;

        info!(id = %id, owner = %caller, viewer = %viewer, sequence, "[pv-03] access revoked");
        Ok(())
    }

    fn get_accessible(&self, caller: &Identity) -> LedgerResult<Vec<Record>> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for id in self.owned_by(caller)? {
            if seen.insert(id.clone()) {
                records.push(self.require_record(&id)?);
            }
        }

        for id in self.viewer_index(caller)? {
            if seen.contains(&id) || !self.is_granted(&id, caller)? {
                continue;
            }
            let record = self.require_record(&id)?;
            if record.owner == *caller {
                continue;
            }
            seen.insert(id);
            records.push(record);
        }

        Ok(records)
    }

    fn check_access(&self, id: &ContentId, identity: &Identity) -> LedgerResult<bool> {
        match self.load_record(id)? {
            None => Ok(false),
            Some(record) if record.owner == *identity => Ok(true),
            Some(_) => self.is_granted(id, identity),
        }
    }

    fn get_record(&self, id: &ContentId) -> LedgerResult<Option<Record>> {
        self.load_record(id)
    }

    fn owned_by(&self, owner: &Identity) -> LedgerResult<Vec<ContentId>> {
        self.kv_store
            .prefix_scan(&KeyPrefix::owned_prefix(owner))?
            .iter()
            .map(|(_, value)| decode_id(value))
            .collect()
    }

    fn viewer_index(&self, viewer: &Identity) -> LedgerResult<Vec<ContentId>> {
        self.kv_store
            .prefix_scan(&KeyPrefix::viewer_slot_prefix(viewer))?
            .iter()
            .map(|(_, value)| decode_id(value))
            .collect()
    }

    fn history(&self, id: &ContentId) -> LedgerResult<Vec<SequencedEvent>> {
        Ok(self
            .scan_events()?
            .into_iter()
            .filter(|e| e.event.id() == id)
            .collect())
    }

    fn events_since(&self, after: u64) -> LedgerResult<Vec<SequencedEvent>> {
        Ok(self
            .scan_events()?
            .into_iter()
            .filter(|e| e.sequence > after)
            .collect())
    }
}

fn decode_id(bytes: &[u8]) -> LedgerResult<ContentId> {
    std::str::from_utf8(bytes)
        .map(ContentId::new)
        .map_err(|_| corrupt("content id"))
}

fn corrupt(what: &str) -> LedgerError {
    LedgerError::Storage {
        message: format!("corrupt {}", what),
    }
}
