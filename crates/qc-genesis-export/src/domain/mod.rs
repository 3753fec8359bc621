//! # Domain Module
//!
//! Core types of the export pipeline.
//!
//! - `genesis` - Genesis document layout and codec
//! - `export` - Exporter request/result values and build identity
//! - `backend` - Storage backend selection
//! - `errors` - Pipeline error taxonomy

pub mod backend;
pub mod errors;
pub mod export;
pub mod genesis;

pub use backend::{resolve, BackendSelector, ACCEPTED_BACKENDS, RETIRED_BACKENDS};
pub use errors::{ExportError, KVStoreError};
pub use export::{
    BuildInfo, ExportHeight, ExportRequest, ExportedState, ModuleFilter, LATEST_HEIGHT,
};
pub use genesis::{
    ConsensusGenesis, ConsensusParams, GenesisDocument, GenesisTime, GenesisValidator,
    ValidatorPubKey,
};
