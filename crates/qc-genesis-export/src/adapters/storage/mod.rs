//! # Storage Adapters
//!
//! Store drivers available to the export pipeline.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to compile the RocksDB driver:
//!
//! ```toml
//! qc-genesis-export = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! The in-memory driver is always available for embedding and tests.

pub mod memory;
pub mod registry;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use memory::{InMemoryDriver, InMemoryKVStore};
pub use registry::DriverRegistry;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbDriver, RocksDbStore};
