//! # Outbound Ports (Driven Ports)
//!
//! Capabilities the export pipeline requires from its host.
//!
//! - [`KeyValueStore`] / [`StoreDriver`]: the storage backend boundary
//! - [`AppExporter`]: the application's state export capability

use std::path::Path;

use crate::domain::{ExportRequest, ExportedState, KVStoreError};

/// Read access to an opened application database.
///
/// Exporters only read committed state, so the port has no write half.
///
/// Production: `RocksDbStore` (adapters/storage/rocksdb_adapter.rs, `rocksdb` feature)
/// Testing: `InMemoryKVStore` (adapters/storage/memory.rs)
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Iterate over keys with a prefix, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Opens named databases for one storage backend.
///
/// Driver implementations own backend-level locking: a second opener of the
/// same directory must fail inside `open`.
pub trait StoreDriver: Send + Sync {
    /// Open (or create) database `name` under `dir`.
    fn open(&self, name: &str, dir: &Path) -> Result<Box<dyn KeyValueStore>, KVStoreError>;
}

/// The application's state export capability.
///
/// Given the opened application store and the request parameters, produce a
/// single snapshot of application state. Zero-height renormalization, jail
/// exemptions and module filtering are entirely the exporter's policy.
pub trait AppExporter: Send + Sync {
    /// Export state from `store`.
    fn export(
        &self,
        store: &dyn KeyValueStore,
        request: &ExportRequest,
    ) -> anyhow::Result<ExportedState>;
}

impl<F> AppExporter for F
where
    F: Fn(&dyn KeyValueStore, &ExportRequest) -> anyhow::Result<ExportedState> + Send + Sync,
{
    fn export(
        &self,
        store: &dyn KeyValueStore,
        request: &ExportRequest,
    ) -> anyhow::Result<ExportedState> {
        self(store, request)
    }
}
