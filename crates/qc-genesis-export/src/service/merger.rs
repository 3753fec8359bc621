//! # Genesis Merger
//!
//! Builds the exported genesis document from the source document's identity
//! fields and the freshly exported state.
//!
//! | Field | Source |
//! |-------|--------|
//! | `chain_id`, `genesis_time` | source genesis |
//! | `app_name`, `app_version` | running binary |
//! | `app_state`, `initial_height`, `consensus` | exported state |

use crate::domain::{BuildInfo, ConsensusGenesis, ExportedState, GenesisDocument};

/// Merge `exported` into a new document based on `source`.
///
/// `source` is left untouched; `exported` is consumed.
pub fn merge(source: &GenesisDocument, exported: ExportedState, build: &BuildInfo) -> GenesisDocument {
    GenesisDocument {
        app_name: build.app_name.clone(),
        app_version: build.version.clone(),
        genesis_time: source.genesis_time.clone(),
        chain_id: source.chain_id.clone(),
        initial_height: exported.height,
        app_state: exported.app_state,
        consensus: Some(ConsensusGenesis::new(
            exported.consensus_params,
            exported.validators,
        )),
    }
}
