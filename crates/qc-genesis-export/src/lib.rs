//! # Genesis Export
//!
//! Turns the persisted state of a node into a new genesis document, the file
//! a chain restarts from after an upgrade or a fork.
//!
//! ## Pipeline
//!
//! ```text
//! <home>/config/genesis.json ─► locate ─► resolve backend
//!                                              │
//!                  ┌───────────────────────────┴──────────────────────┐
//!      no exporter ▼                                                   ▼ exporter
//!        copy genesis verbatim          open <home>/data/application ─► export
//!                  │                                                   │
//!                  │                              merge with source genesis
//!                  ▼                                                   ▼
//!                     stdout (compact) │ --output-document (indented, atomic)
//! ```
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Genesis layout, export request/result, backend selection, errors
//! - `ports/` - `KeyValueStore`, `StoreDriver` and `AppExporter` traits
//! - `adapters/` - In-memory and RocksDB drivers, driver registry
//! - `service/` - Pipeline stages and the orchestrator
//! - `config` / `cli` - Settings files and the `export` command
//! - `telemetry` - Logging setup
//!
//! ## Usage
//!
//! ```ignore
//! use qc_genesis_export::{BuildInfo, DriverRegistry, ExportConfig, ExportOrchestrator};
//!
//! let registry = DriverRegistry::with_default_drivers();
//! let exporter = |store: &dyn KeyValueStore, req: &ExportRequest| my_app.export(store, req);
//! let orchestrator = ExportOrchestrator::new(&registry, Some(&exporter), BuildInfo::new("qcd", "1.2.0"));
//! orchestrator.run(ExportConfig::new("/var/lib/qcd"))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-export key types for convenience
pub use adapters::storage::{DriverRegistry, InMemoryDriver, InMemoryKVStore};
pub use cli::{run_export, ExportArgs};
pub use config::{BackendSettings, ExportConfig, NodeSettings, SettingsError};
pub use domain::{
    resolve, BackendSelector, BuildInfo, ConsensusGenesis, ConsensusParams, ExportError,
    ExportHeight, ExportRequest, ExportedState, GenesisDocument, GenesisTime, GenesisValidator,
    KVStoreError, ModuleFilter, ValidatorPubKey,
};
pub use ports::outbound::{AppExporter, KeyValueStore, StoreDriver};
pub use service::{ExportOrchestrator, ExportOutcome, ExportPath, OutputSink, OutputTarget};
pub use telemetry::{init_logging, LogConfig};

#[cfg(feature = "rocksdb")]
pub use adapters::storage::{RocksDbConfig, RocksDbDriver, RocksDbStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
