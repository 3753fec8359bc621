//! # In-Memory Storage
//!
//! Map-backed store and driver for embedding applications and tests.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::KVStoreError;
use crate::ports::outbound::{KeyValueStore, StoreDriver};

/// In-memory key-value store.
///
/// Backed by an ordered map so prefix scans come back in key order, like
/// the on-disk backends.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key. Used to seed stores before they are handed
    /// to a driver.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.data.insert(key.to_vec(), value.to_vec());
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        let results = self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}

/// Driver that hands out copies of a seeded in-memory store.
///
/// Every `open` returns an independent copy of the seed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDriver {
    seed: InMemoryKVStore,
}

impl InMemoryDriver {
    /// Driver whose stores start out empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose stores start out with the contents of `seed`.
    pub fn with_store(seed: InMemoryKVStore) -> Self {
        Self { seed }
    }
}

impl StoreDriver for InMemoryDriver {
    fn open(&self, name: &str, dir: &Path) -> Result<Box<dyn KeyValueStore>, KVStoreError> {
        tracing::debug!(db = name, dir = %dir.display(), "opening in-memory store");
        Ok(Box::new(self.seed.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut store = InMemoryKVStore::new();
        assert!(store.is_empty());

        store.put(b"key1", b"value1");
        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(store.exists(b"key1").unwrap());
        assert!(!store.exists(b"key2").unwrap());

        store.put(b"key1", b"value2");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"key1").unwrap(), Some(b"value2".to_vec()));
    }

    #[test]
    fn test_prefix_scan_ordered() {
        let mut store = InMemoryKVStore::new();
        store.put(b"bank/0003", b"c");
        store.put(b"bank/0001", b"a");
        store.put(b"staking/0001", b"s");
        store.put(b"bank/0002", b"b");

        let keys: Vec<Vec<u8>> = store
            .prefix_scan(b"bank/")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec![b"bank/0001".to_vec(), b"bank/0002".to_vec(), b"bank/0003".to_vec()]
        );
    }

    #[test]
    fn test_driver_hands_out_seeded_copies() {
        let mut seed = InMemoryKVStore::new();
        seed.put(b"height", b"42");
        let driver = InMemoryDriver::with_store(seed);

        let first = driver.open("application", Path::new("/unused")).unwrap();
        let second = driver.open("application", Path::new("/unused")).unwrap();
        assert_eq!(first.get(b"height").unwrap(), Some(b"42".to_vec()));
        assert_eq!(second.prefix_scan(b"").unwrap().len(), 1);
    }
}
