use super::{apply, scan, KvMap};
use crate::domain::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File-backed key-value store.
///
/// The whole map lives in memory and is rewritten to disk on every batch
/// via a temp file and rename, so a crash leaves either the old or the new
/// file. On-disk format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
///
/// A handle owns an exclusive lock on `<path>.lock` for its whole lifetime,
/// so at most one handle (in any process) ever writes a given file.
pub struct FileBackedKVStore {
    data: KvMap,
    path: PathBuf,
    /// Released on drop.
    _lock: File,
}

impl FileBackedKVStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// Fails with `KVStoreError::AlreadyLocked` while another handle is open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();
        let lock = acquire_lock(&path)?;

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes)?;
                tracing::info!(
                    "[pv-03] loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("[pv-03] no existing ledger file at {}", path.display());
                KvMap::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        Ok(Self {
            data,
            path,
            _lock: lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &KvMap) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Persist the next state before adopting it; a failed write leaves
        // both memory and disk untouched.
        let mut next = self.data.clone();
        apply(&mut next, operations);
        self.save(&next)?;
        self.data = next;
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}

fn lock_file_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

fn acquire_lock(path: &Path) -> Result<File, KVStoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    let lock_path = lock_file_path(path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(io_error)?;

    // Non-blocking; a held lock is an error.
    file.try_lock_exclusive().map_err(|_| {
        tracing::warn!("[pv-03] ledger lock {} is held", lock_path.display());
        KVStoreError::AlreadyLocked {
            path: lock_path.display().to_string(),
        }
    })?;
    Ok(file)
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn decode(bytes: &[u8]) -> Result<KvMap, KVStoreError> {
    let mut data = KvMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let start = *cursor;
    let truncated = || KVStoreError::CorruptionError {
        message: format!("truncated entry at offset {}", start),
    };

    let len_bytes: [u8; 4] = bytes
        .get(start..start + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(truncated)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let chunk = bytes
        .get(start + 4..start + 4 + len)
        .ok_or_else(truncated)?
        .to_vec();
    *cursor = start + 4 + len;
    Ok(chunk)
}
