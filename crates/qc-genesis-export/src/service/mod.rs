//! # Service Layer
//!
//! The export pipeline stages and the orchestrator that runs them.
//!
//! ## Modules
//!
//! - `locator`: genesis file and data directory paths
//! - `store`: opening the application store
//! - `merger`: exported state + source genesis -> new genesis
//! - `sink`: stdout or atomic file output
//! - `orchestrator`: one export run, end to end

pub mod locator;
pub mod merger;
pub mod orchestrator;
pub mod sink;
pub mod store;

pub use locator::{data_dir, genesis_path, locate, CONFIG_DIR, DATA_DIR, GENESIS_FILE};
pub use merger::merge;
pub use orchestrator::{ExportOrchestrator, ExportOutcome, ExportPath};
pub use sink::{OutputSink, OutputTarget, COPY_BUFFER_SIZE};
pub use store::{open_app_store, APP_DB_NAME};
