//! # RocksDB Storage Adapter
//!
//! RocksDB implementation of the `KeyValueStore` and `StoreDriver` ports.
//!
//! ## Layout
//!
//! A database named `application` opened under `<home>/data` lives at
//! `<home>/data/application.db`. Application stores use the default column
//! family only.
//!
//! RocksDB's own `LOCK` file keeps a second process from opening the same
//! database while an export is running.

use std::path::{Path, PathBuf};

use rocksdb::{IteratorMode, Options, DB};

use crate::domain::KVStoreError;
use crate::ports::outbound::{KeyValueStore, StoreDriver};

/// RocksDB tuning used when opening application stores.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Block cache size in bytes (default: 256MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 64MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            block_cache_size: 256 * 1024 * 1024,
            write_buffer_size: 64 * 1024 * 1024,
            max_write_buffer_number: 3,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers)
    pub fn for_testing() -> Self {
        Self {
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
        }
    }
}

/// RocksDB-backed key-value store.
pub struct RocksDbStore {
    db: DB,
}

impl RocksDbStore {
    /// Open or create a RocksDB database at `path`.
    pub fn open(path: &Path, config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, path).map_err(|e| KVStoreError::Io {
            message: format!("Failed to open RocksDB at {}: {}", path.display(), e),
        })?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::Io {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| KVStoreError::Io {
                message: format!("RocksDB exists check failed: {}", e),
            })
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        let mut results = Vec::new();

        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, rocksdb::Direction::Forward));

        for item in iter {
            let (key, value) = item.map_err(|e| KVStoreError::Io {
                message: format!("RocksDB scan failed: {}", e),
            })?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }

        Ok(results)
    }
}

/// Store driver for the `rocksdb` backend.
#[derive(Debug, Clone, Default)]
pub struct RocksDbDriver {
    config: RocksDbConfig,
}

impl RocksDbDriver {
    /// Driver opening stores with `config`.
    pub fn new(config: RocksDbConfig) -> Self {
        Self { config }
    }

    /// On-disk location of database `name` under `dir`.
    pub fn db_path(name: &str, dir: &Path) -> PathBuf {
        dir.join(format!("{}.db", name))
    }
}

impl StoreDriver for RocksDbDriver {
    fn open(&self, name: &str, dir: &Path) -> Result<Box<dyn KeyValueStore>, KVStoreError> {
        let path = Self::db_path(name, dir);
        tracing::info!(path = %path.display(), "opening RocksDB store");
        let store = RocksDbStore::open(&path, self.config.clone())?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rocksdb_basic_operations() {
        let temp_dir = TempDir::new().unwrap();
        let store = RocksDbStore::open(temp_dir.path(), RocksDbConfig::for_testing()).unwrap();

        store.db.put(b"key1", b"value1").unwrap();
        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(store.exists(b"key1").unwrap());
        assert!(!store.exists(b"nonexistent").unwrap());
    }

    #[test]
    fn test_rocksdb_prefix_scan() {
        let temp_dir = TempDir::new().unwrap();
        let store = RocksDbStore::open(temp_dir.path(), RocksDbConfig::for_testing()).unwrap();

        store.db.put(b"bank/0002", b"b").unwrap();
        store.db.put(b"bank/0001", b"a").unwrap();
        store.db.put(b"staking/0001", b"s").unwrap();

        let keys: Vec<_> = store
            .prefix_scan(b"bank/")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"bank/0001".to_vec(), b"bank/0002".to_vec()]);
    }

    #[test]
    fn test_reopened_store_sees_committed_state() {
        let temp_dir = TempDir::new().unwrap();
        let driver = RocksDbDriver::new(RocksDbConfig::for_testing());
        let path = RocksDbDriver::db_path("application", temp_dir.path());
        {
            let store = RocksDbStore::open(&path, RocksDbConfig::for_testing()).unwrap();
            store.db.put(b"height", b"42").unwrap();
        }

        let store = driver.open("application", temp_dir.path()).unwrap();
        assert_eq!(store.get(b"height").unwrap(), Some(b"42".to_vec()));
    }

    #[test]
    fn test_second_open_is_locked_out() {
        let temp_dir = TempDir::new().unwrap();
        let driver = RocksDbDriver::new(RocksDbConfig::for_testing());

        let _first = driver.open("application", temp_dir.path()).unwrap();
        assert!(driver.open("application", temp_dir.path()).is_err());
    }
}
