//! # Export Configuration
//!
//! One [`ExportConfig`] is assembled at the process boundary from CLI flags
//! and the node's settings files, then handed to the orchestrator.
//!
//! ## Backend Settings Sources
//!
//! | Setting | Flag / env | File |
//! |---------|------------|------|
//! | `app-db-backend` | `--app-db-backend` / `QC_APP_DB_BACKEND` | `config/app.toml` |
//! | `db_backend` | `--db-backend` / `QC_DB_BACKEND` | `config/config.toml` |
//!
//! A flag value always wins over the file value.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ExportRequest;
use crate::service::locator::CONFIG_DIR;
use crate::service::sink::OutputTarget;

/// Application settings file inside the config directory.
pub const APP_SETTINGS_FILE: &str = "app.toml";
/// Consensus engine settings file inside the config directory.
pub const NODE_SETTINGS_FILE: &str = "config.toml";

/// Everything a single export run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Node home directory.
    pub home: PathBuf,
    /// Raw backend settings, resolved by the orchestrator.
    pub backend: BackendSettings,
    /// Parameters passed through to the exporter.
    pub request: ExportRequest,
    /// Output destination.
    pub output: OutputTarget,
}

impl ExportConfig {
    /// Config for `home` with every other setting at its default.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            backend: BackendSettings::default(),
            request: ExportRequest::default(),
            output: OutputTarget::Stdout,
        }
    }
}

/// The two backend settings, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSettings {
    /// Application-specific backend (`app-db-backend`).
    pub app_db_backend: Option<String>,
    /// Generic node backend (`db_backend`).
    pub db_backend: Option<String>,
}

impl BackendSettings {
    /// Fill unset fields from `other`.
    pub fn or(self, other: BackendSettings) -> Self {
        Self {
            app_db_backend: non_empty(self.app_db_backend).or(non_empty(other.app_db_backend)),
            db_backend: non_empty(self.db_backend).or(non_empty(other.db_backend)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Errors reading node settings files.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// TOML decode error.
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct AppToml {
    #[serde(rename = "app-db-backend", default)]
    app_db_backend: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigToml {
    #[serde(default)]
    db_backend: Option<String>,
}

/// Backend settings found in the node's settings files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSettings {
    /// Settings read from the files.
    pub backend: BackendSettings,
}

impl NodeSettings {
    /// Read `config/app.toml` and `config/config.toml` under `home`.
    ///
    /// Missing files are treated as empty. Unrelated keys are ignored.
    pub fn load(home: &Path) -> Result<Self, SettingsError> {
        let config_dir = home.join(CONFIG_DIR);
        let app: AppToml = read_toml(&config_dir.join(APP_SETTINGS_FILE))?;
        let node: ConfigToml = read_toml(&config_dir.join(NODE_SETTINGS_FILE))?;

        Ok(Self {
            backend: BackendSettings {
                app_db_backend: app.app_db_backend,
                db_backend: node.db_backend,
            },
        })
    }
}

fn read_toml<T>(path: &Path) -> Result<T, SettingsError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::trace!(path = %path.display(), "settings file absent");
            return Ok(T::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_settings(home: &Path, file: &str, content: &str) {
        let dir = home.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_missing_files_are_empty() {
        let home = TempDir::new().unwrap();
        let settings = NodeSettings::load(home.path()).unwrap();
        assert_eq!(settings, NodeSettings::default());
    }

    #[test]
    fn test_reads_both_files() {
        let home = TempDir::new().unwrap();
        write_settings(
            home.path(),
            APP_SETTINGS_FILE,
            "minimum-gas-prices = \"0qc\"\napp-db-backend = \"pebbledb\"\n\n[api]\nenable = true\n",
        );
        write_settings(
            home.path(),
            NODE_SETTINGS_FILE,
            "moniker = \"alpha\"\ndb_backend = \"rocksdb\"\n\n[p2p]\nladdr = \"tcp://0.0.0.0:26656\"\n",
        );

        let settings = NodeSettings::load(home.path()).unwrap();
        assert_eq!(settings.backend.app_db_backend.as_deref(), Some("pebbledb"));
        assert_eq!(settings.backend.db_backend.as_deref(), Some("rocksdb"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let home = TempDir::new().unwrap();
        write_settings(home.path(), NODE_SETTINGS_FILE, "db_backend = [unterminated");

        let err = NodeSettings::load(home.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { ref path, .. } if path.ends_with("config.toml")));
    }

    #[test]
    fn test_flags_override_files() {
        let flags = BackendSettings {
            app_db_backend: Some("rocksdb".into()),
            db_backend: None,
        };
        let files = BackendSettings {
            app_db_backend: Some("pebbledb".into()),
            db_backend: Some("goleveldb".into()),
        };

        let merged = flags.or(files);
        assert_eq!(merged.app_db_backend.as_deref(), Some("rocksdb"));
        assert_eq!(merged.db_backend.as_deref(), Some("goleveldb"));
    }

    #[test]
    fn test_empty_flag_does_not_mask_file() {
        let flags = BackendSettings {
            app_db_backend: Some(String::new()),
            db_backend: None,
        };
        let files = BackendSettings {
            app_db_backend: Some("pebbledb".into()),
            db_backend: None,
        };
        assert_eq!(flags.or(files).app_db_backend.as_deref(), Some("pebbledb"));
    }

    #[test]
    fn test_new_config_defaults() {
        let config = ExportConfig::new("/nodes/alpha");
        assert_eq!(config.home, PathBuf::from("/nodes/alpha"));
        assert_eq!(config.output, OutputTarget::Stdout);
        assert_eq!(config.backend, BackendSettings::default());
    }
}
