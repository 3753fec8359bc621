//! # Export Command
//!
//! The `export` command surface. Applications embedding the pipeline flatten
//! [`ExportArgs`] into their own CLI and call [`run_export`] with their
//! exporter.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::adapters::storage::DriverRegistry;
use crate::config::{BackendSettings, ExportConfig, NodeSettings};
use crate::domain::{BuildInfo, ExportHeight, ExportRequest, ModuleFilter, LATEST_HEIGHT};
use crate::ports::outbound::AppExporter;
use crate::service::orchestrator::{ExportOrchestrator, ExportOutcome};
use crate::service::sink::OutputTarget;

/// Default node home directory.
pub const DEFAULT_HOME: &str = ".quantum-chain";

/// Export state to genesis file
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Node home directory
    #[arg(long, env = "QC_HOME", default_value = DEFAULT_HOME)]
    pub home: PathBuf,

    /// Export state from a particular height (-1 means latest height)
    #[arg(long, default_value_t = LATEST_HEIGHT, allow_negative_numbers = true)]
    pub height: i64,

    /// Export state to start at height zero (perform preprocessing)
    #[arg(long)]
    pub for_zero_height: bool,

    /// Comma-separated list of operator addresses of jailed validators to unjail
    #[arg(long, value_delimiter = ',')]
    pub jail_allowed_addrs: Vec<String>,

    /// Comma-separated list of modules to export. If empty, will export all modules
    #[arg(long, value_delimiter = ',')]
    pub modules_to_export: Vec<String>,

    /// Exported genesis to output document rather than stdout
    #[arg(long)]
    pub output_document: Option<PathBuf>,

    /// Application database backend (overrides config/app.toml)
    #[arg(long, env = "QC_APP_DB_BACKEND")]
    pub app_db_backend: Option<String>,

    /// Node database backend (overrides config/config.toml)
    #[arg(long, env = "QC_DB_BACKEND")]
    pub db_backend: Option<String>,
}

impl ExportArgs {
    /// Build the run configuration, reading settings files under `--home`.
    pub fn into_config(self) -> anyhow::Result<ExportConfig> {
        let settings = NodeSettings::load(&self.home)
            .with_context(|| format!("loading node settings from {}", self.home.display()))?;

        let flags = BackendSettings {
            app_db_backend: self.app_db_backend,
            db_backend: self.db_backend,
        };

        let request = ExportRequest {
            height: ExportHeight::from_flag(self.height)?,
            for_zero_height: self.for_zero_height,
            jail_allowed_addrs: self
                .jail_allowed_addrs
                .into_iter()
                .map(|addr| addr.trim().to_string())
                .filter(|addr| !addr.is_empty())
                .collect(),
            modules: ModuleFilter::from_names(self.modules_to_export),
        };

        Ok(ExportConfig {
            home: self.home,
            backend: flags.or(settings.backend),
            request,
            output: OutputTarget::from_flag(self.output_document),
        })
    }
}

/// Parse-to-outcome entry point for an `export` invocation.
pub fn run_export(
    args: ExportArgs,
    registry: &DriverRegistry,
    exporter: Option<&dyn AppExporter>,
    build: BuildInfo,
) -> anyhow::Result<ExportOutcome> {
    let config = args.into_config()?;
    tracing::debug!(?config, "export configuration");

    let outcome = ExportOrchestrator::new(registry, exporter, build).run(config)?;
    Ok(outcome)
}
