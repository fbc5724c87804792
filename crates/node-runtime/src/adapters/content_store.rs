//! Content store adapters
//!
//! Ids are BLAKE3-derived (`b3` + hex), so re-pinning identical bytes
//! returns the same id and the id stays independent of the SHA-256
//! fingerprint the ledger anchors.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::blake3_content_id;
use shared_types::{ContentId, ContentStore, ContentStoreError};
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

fn ensure_pinnable(bytes: &[u8]) -> Result<(), ContentStoreError> {
    if bytes.is_empty() {
        return Err(ContentStoreError::InvalidInput(
            "refusing to pin empty content".to_string(),
        ));
    }
    Ok(())
}

/// In-memory content store for tests and ephemeral nodes.
#[derive(Default)]
pub struct InMemoryContentStore {
    blobs: RwLock<HashMap<ContentId, Vec<u8>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Replace the bytes behind `id`, simulating a store that drifted.
    pub fn overwrite(&self, id: &ContentId, bytes: Vec<u8>) {
        self.blobs.write().insert(id.clone(), bytes);
    }

    /// Forget `id`, simulating an unpinned or lost blob.
    pub fn remove(&self, id: &ContentId) {
        self.blobs.write().remove(id);
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn pin(&self, bytes: &[u8]) -> Result<ContentId, ContentStoreError> {
        ensure_pinnable(bytes)?;
        let id = blake3_content_id(bytes);
        self.blobs
            .write()
            .entry(id.clone())
            .or_insert_with(|| bytes.to_vec());
        Ok(id)
    }

    async fn fetch(&self, id: &ContentId) -> Result<Vec<u8>, ContentStoreError> {
        self.blobs
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ContentStoreError::NotFound(id.to_string()))
    }
}

/// Directory-backed content store: one file per content id.
pub struct FileContentStore {
    dir: PathBuf,
}

impl FileContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, id: &ContentId) -> Result<PathBuf, ContentStoreError> {
        // Ids become file names; anything but [0-9a-z] could escape the dir.
        let valid = !id.is_empty()
            && id
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase());
        if !valid {
            return Err(ContentStoreError::InvalidInput(format!(
                "malformed content id {:?}",
                id.as_str()
            )));
        }
        Ok(self.dir.join(id.as_str()))
    }
}

fn io_error(e: std::io::Error) -> ContentStoreError {
    ContentStoreError::Io(e.to_string())
}

/// Write `bytes` to a uniquely named temp file in `dir`, then move it onto `path`.
fn write_blob(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), ContentStoreError> {
    std::fs::create_dir_all(dir).map_err(io_error)?;
    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(bytes).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;

    match temp.persist(path) {
        Ok(_) => Ok(()),
        // Same id means same bytes, so losing the race to another pin is fine.
        Err(e) if path.exists() => {
            debug!(path = %path.display(), error = %e.error, "lost pin race");
            Ok(())
        }
        Err(e) => Err(io_error(e.error)),
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn pin(&self, bytes: &[u8]) -> Result<ContentId, ContentStoreError> {
        ensure_pinnable(bytes)?;
        let id = blake3_content_id(bytes);
        let path = self.blob_path(&id)?;

        if tokio::fs::try_exists(&path).await.map_err(io_error)? {
            debug!(id = %id, "content already pinned");
            return Ok(id);
        }

        let dir = self.dir.clone();
        let owned = bytes.to_vec();
        tokio::task::spawn_blocking(move || write_blob(&dir, &path, &owned))
            .await
            .map_err(|e| ContentStoreError::Io(e.to_string()))??;

        debug!(id = %id, bytes = bytes.len(), "content pinned");
        Ok(id)
    }

    async fn fetch(&self, id: &ContentId) -> Result<Vec<u8>, ContentStoreError> {
        let path = self.blob_path(id)?;
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentStoreError::NotFound(id.to_string()),
            _ => io_error(e),
        })
    }
}
