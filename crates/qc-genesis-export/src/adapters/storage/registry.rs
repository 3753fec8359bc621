//! # Driver Registry
//!
//! Maps backend selectors to the store drivers compiled into this build.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{BackendSelector, ExportError, KVStoreError};
use crate::ports::outbound::{KeyValueStore, StoreDriver};

/// Table of available storage drivers.
pub struct DriverRegistry {
    drivers: BTreeMap<BackendSelector, Box<dyn StoreDriver>>,
    default_backend: BackendSelector,
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverRegistry {
    /// Empty registry whose default backend is `goleveldb`.
    pub fn new() -> Self {
        Self {
            drivers: BTreeMap::new(),
            default_backend: BackendSelector::GoLevelDb,
        }
    }

    /// Registry with every driver enabled by crate features.
    ///
    /// With the `rocksdb` feature, RocksDB is registered and becomes the
    /// default backend.
    pub fn with_default_drivers() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(feature = "rocksdb")]
        {
            registry.register(
                BackendSelector::RocksDb,
                Box::new(super::rocksdb_adapter::RocksDbDriver::default()),
            );
            registry.set_default_backend(BackendSelector::RocksDb);
        }

        registry
    }

    /// Register (or replace) the driver for `backend`.
    ///
    /// `BackendSelector::Default` is not a concrete backend and is ignored;
    /// use [`DriverRegistry::set_default_backend`] instead.
    pub fn register(&mut self, backend: BackendSelector, driver: Box<dyn StoreDriver>) {
        if backend == BackendSelector::Default {
            tracing::warn!("ignoring driver registration for the default selector");
            return;
        }
        self.drivers.insert(backend, driver);
    }

    /// Choose which concrete backend `BackendSelector::Default` opens.
    pub fn set_default_backend(&mut self, backend: BackendSelector) {
        if backend != BackendSelector::Default {
            self.default_backend = backend;
        }
    }

    /// Concrete backend a selector maps to.
    pub fn effective(&self, backend: BackendSelector) -> BackendSelector {
        match backend {
            BackendSelector::Default => self.default_backend,
            concrete => concrete,
        }
    }

    /// `"rocksdb"`, or `"none"` for an empty registry.
    pub fn available(&self) -> String {
        if self.drivers.is_empty() {
            return "none".to_string();
        }
        self.drivers
            .keys()
            .map(BackendSelector::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Open database `name` under `dir` with the driver for `backend`.
    pub fn open(
        &self,
        backend: BackendSelector,
        name: &str,
        dir: &Path,
    ) -> Result<Box<dyn KeyValueStore>, ExportError> {
        let concrete = self.effective(backend);
        let driver = self
            .drivers
            .get(&concrete)
            .ok_or_else(|| ExportError::BackendUnavailable {
                backend: concrete,
                available: self.available(),
            })?;

        driver
            .open(name, dir)
            .map_err(|source: KVStoreError| ExportError::StoreOpenFailed {
                backend: concrete,
                source,
            })
    }
}
