//! Genesis file and data directory locations under a node home.

use std::path::{Path, PathBuf};

use crate::domain::ExportError;

/// `<home>/config`
pub const CONFIG_DIR: &str = "config";
/// `<home>/data`
pub const DATA_DIR: &str = "data";
/// Genesis file name inside the config directory.
pub const GENESIS_FILE: &str = "genesis.json";

/// Resolve the existing genesis file of the node at `home`.
///
/// # Errors
///
/// `NotFound` if `<home>/config/genesis.json` is missing or is not a file.
pub fn locate(home: &Path) -> Result<PathBuf, ExportError> {
    let path = genesis_path(home);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ExportError::NotFound { path })
    }
}

/// Expected genesis file path, whether or not it exists.
pub fn genesis_path(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(GENESIS_FILE)
}

/// Directory holding the node's databases.
pub fn data_dir(home: &Path) -> PathBuf {
    home.join(DATA_DIR)
}
