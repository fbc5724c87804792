//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;

use crate::ports::outbound::{BatchOperation, ScanResult};
use std::collections::BTreeMap;

type KvMap = BTreeMap<Vec<u8>, Vec<u8>>;

fn apply(data: &mut KvMap, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}

fn scan(data: &KvMap, prefix: &[u8]) -> ScanResult {
    data.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
