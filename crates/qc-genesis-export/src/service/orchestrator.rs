//! # Export Orchestrator
//!
//! Drives one export run from a node home directory to the output target.
//!
//! ## Flow
//!
//! ```text
//! locate genesis ─► resolve backend ─► select path
//!                                        │
//!        ┌───────────────────────────────┴─────────────────────┐
//!        ▼ Verbatim (no exporter)                               ▼ Delegated
//!   stream genesis bytes unchanged          open store ─► export ─► merge ─► write
//! ```
//!
//! Every step runs at most once and any failure aborts the run. The store
//! handle is released before the merged document is written.

use std::io::{self, Write};

use crate::adapters::storage::DriverRegistry;
use crate::config::ExportConfig;
use crate::domain::{resolve, BuildInfo, ExportError, GenesisDocument};
use crate::ports::outbound::AppExporter;

use super::locator::locate;
use super::merger::merge;
use super::sink::OutputSink;
use super::store::open_app_store;

/// Which of the two export strategies a run takes.
pub enum ExportPath<'a> {
    /// No exporter: copy the existing genesis file unchanged.
    Verbatim,
    /// Hand the opened store to the exporter and merge its result.
    Delegated(&'a dyn AppExporter),
}

impl<'a> ExportPath<'a> {
    /// Delegated iff an exporter is available.
    pub fn select(exporter: Option<&'a dyn AppExporter>) -> Self {
        match exporter {
            Some(exporter) => ExportPath::Delegated(exporter),
            None => ExportPath::Verbatim,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The source genesis was copied unchanged.
    Copied {
        /// Bytes written.
        bytes: u64,
    },
    /// A merged genesis was written.
    Exported {
        /// `initial_height` of the written document.
        initial_height: i64,
    },
}

/// Coordinates locator, resolver, store, exporter, merger and sink.
pub struct ExportOrchestrator<'a> {
    registry: &'a DriverRegistry,
    exporter: Option<&'a dyn AppExporter>,
    build: BuildInfo,
}

impl<'a> ExportOrchestrator<'a> {
    /// Create an orchestrator. `exporter` is `None` for binaries without
    /// export support.
    pub fn new(
        registry: &'a DriverRegistry,
        exporter: Option<&'a dyn AppExporter>,
        build: BuildInfo,
    ) -> Self {
        Self {
            registry,
            exporter,
            build,
        }
    }

    /// Run an export, writing stdout output to the process stdout.
    pub fn run(&self, config: ExportConfig) -> Result<ExportOutcome, ExportError> {
        self.run_with_stdout(config, io::stdout())
    }

    /// Run an export with an explicit stdout writer.
    pub fn run_with_stdout<W: Write>(
        &self,
        config: ExportConfig,
        stdout: W,
    ) -> Result<ExportOutcome, ExportError> {
        let ExportConfig {
            home,
            backend,
            request,
            output,
        } = config;

        let genesis_path = locate(&home)?;
        let backend = resolve(backend.app_db_backend.as_deref(), backend.db_backend.as_deref())?;
        let mut sink = OutputSink::with_stdout(output, stdout);

        match ExportPath::select(self.exporter) {
            ExportPath::Verbatim => {
                tracing::warn!(
                    genesis = %genesis_path.display(),
                    "app exporter not defined, returning genesis file"
                );
                let bytes = sink.stream_file(&genesis_path)?;
                Ok(ExportOutcome::Copied { bytes })
            }
            ExportPath::Delegated(exporter) => {
                let exported = {
                    let store = open_app_store(self.registry, &home, backend)?;
                    tracing::info!(
                        height = %request.height,
                        for_zero_height = request.for_zero_height,
                        "exporting application state"
                    );
                    exporter
                        .export(store.as_ref(), &request)
                        .map_err(|source| ExportError::ExportFailed { source })?
                };

                let source = GenesisDocument::from_file(&genesis_path)?;
                let merged = merge(&source, exported, &self.build);
                sink.write_document(&merged)?;

                tracing::info!(
                    chain_id = %merged.chain_id,
                    initial_height = merged.initial_height,
                    "genesis exported"
                );
                Ok(ExportOutcome::Exported {
                    initial_height: merged.initial_height,
                })
            }
        }
    }
}
