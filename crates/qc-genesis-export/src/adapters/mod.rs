//! # Adapters Module
//!
//! Adapter implementations for the export pipeline's driven ports.
//!
//! ## Modules
//!
//! - `storage`: store drivers and the driver registry

pub mod storage;

pub use storage::{DriverRegistry, InMemoryDriver, InMemoryKVStore};
