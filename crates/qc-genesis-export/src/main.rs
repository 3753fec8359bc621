//! qc-genesis-export: export node state to a genesis document.
//!
//! This binary has no application exporter linked in, so `export` returns the
//! node's existing genesis file. Applications build their own binary around
//! [`qc_genesis_export::run_export`] to pass an exporter.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use qc_genesis_export::{
    init_logging, run_export, BuildInfo, DriverRegistry, ExportArgs, ExportOutcome, LogConfig,
};

/// Quantum-Chain genesis export tool
#[derive(Parser, Debug)]
#[command(name = "qc-genesis-export")]
#[command(version, about = "Export chain state to a genesis document")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export state to genesis file
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_env()).context("initializing logging")?;

    let build = BuildInfo::new(env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));
    let registry = DriverRegistry::with_default_drivers();
    tracing::debug!(available = %registry.available(), "storage drivers");

    match cli.command {
        Command::Export(args) => {
            let outcome = run_export(args, &registry, None, build)?;
            match outcome {
                ExportOutcome::Copied { bytes } => {
                    tracing::debug!(bytes, "genesis copied");
                }
                ExportOutcome::Exported { initial_height } => {
                    tracing::debug!(initial_height, "genesis exported");
                }
            }
        }
    }

    Ok(())
}
