//! # Ports Module
//!
//! Hexagonal architecture ports. The pipeline only has driven ports: storage
//! drivers and the application exporter.

pub mod outbound;

pub use outbound::*;
