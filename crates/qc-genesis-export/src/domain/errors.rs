//! # Domain Errors
//!
//! Error types for the genesis export pipeline.
//!
//! ## Design Principles
//!
//! - Every pipeline failure surfaces to the caller; nothing is retried
//! - Only exporter failures get extra context ("error exporting state")
//! - No panics in pipeline logic (use Result instead)

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::backend::BackendSelector;

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source genesis file does not exist.
    #[error("genesis file not found: {}", path.display())]
    NotFound {
        /// Expected genesis file location.
        path: PathBuf,
    },

    /// The configured backend was retired and can no longer be opened.
    #[error("invalid app-db-backend {name:?}, use {accepted} instead")]
    UnsupportedBackend {
        /// Configured backend name.
        name: String,
        /// Accepted alternatives, quoted and comma-separated.
        accepted: String,
    },

    /// The configured backend name is not recognized at all.
    #[error("unknown db backend {name:?}, use {accepted} instead")]
    UnknownBackend {
        /// Configured backend name.
        name: String,
        /// Accepted alternatives, quoted and comma-separated.
        accepted: String,
    },

    /// No driver for the backend is compiled into this build.
    #[error("db backend {backend} is not available in this build (available: {available})")]
    BackendUnavailable {
        /// Backend after default resolution.
        backend: BackendSelector,
        /// Backends that do have a driver.
        available: String,
    },

    /// The storage driver failed to open the application store.
    #[error("failed to open application store with {backend}: {source}")]
    StoreOpenFailed {
        /// Backend whose driver failed.
        backend: BackendSelector,
        /// Driver error.
        #[source]
        source: KVStoreError,
    },

    /// Height flag below the `-1` sentinel.
    #[error("invalid export height {0}: must be -1 (latest) or non-negative")]
    InvalidHeight(i64),

    /// The source genesis file could not be read or parsed.
    ///
    /// Read failures carry the I/O error wrapped by `serde_json::Error::io`.
    #[error("invalid genesis file {}: {source}", path.display())]
    InvalidGenesis {
        /// Source genesis path.
        path: PathBuf,
        /// Read or parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The application exporter returned an error.
    #[error("error exporting state: {source}")]
    ExportFailed {
        /// Error returned by the exporter.
        #[source]
        source: anyhow::Error,
    },

    /// The merged genesis document could not be encoded.
    #[error("failed to serialize genesis document: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Writing to stdout or to the output file failed.
    #[error("failed to write genesis output: {0}")]
    WriteFailed(#[from] io::Error),
}

impl ExportError {
    /// Classify a `serde_json` failure that happened while streaming output.
    ///
    /// I/O failures of the underlying writer become `WriteFailed`, everything
    /// else is an encoding failure.
    pub(crate) fn from_encode(err: serde_json::Error) -> Self {
        if err.is_io() {
            ExportError::WriteFailed(io::Error::from(err))
        } else {
            ExportError::SerializationFailed(err)
        }
    }

    /// A failure reading the source genesis file at `path`.
    pub(crate) fn genesis_read(path: &Path, err: io::Error) -> Self {
        ExportError::InvalidGenesis {
            path: path.to_path_buf(),
            source: serde_json::Error::io(err),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io {
        /// Backend error text.
        message: String,
    },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    Corruption {
        /// Backend error text.
        message: String,
    },
    /// Key not found.
    #[error("Key not found in KV store")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_failed_carries_context() {
        let err = ExportError::ExportFailed {
            source: anyhow::anyhow!("staking module exploded"),
        };
        assert_eq!(
            err.to_string(),
            "error exporting state: staking module exploded"
        );
    }

    #[test]
    fn test_encode_io_errors_become_write_failed() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err = ExportError::from_encode(serde_json::Error::io(io_err));
        assert!(matches!(err, ExportError::WriteFailed(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_genesis_read_failure_is_not_a_write_failure() {
        let err = ExportError::genesis_read(
            Path::new("/node/config/genesis.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ExportError::InvalidGenesis { .. }));
        assert!(err.to_string().starts_with("invalid genesis file /node/config/genesis.json"));
    }

    #[test]
    fn test_not_found_names_path() {
        let err = ExportError::NotFound {
            path: PathBuf::from("/tmp/node/config/genesis.json"),
        };
        assert!(err.to_string().contains("/tmp/node/config/genesis.json"));
    }
}
