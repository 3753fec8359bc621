//! Opening the application store.

use std::path::Path;

use crate::adapters::storage::DriverRegistry;
use crate::domain::{BackendSelector, ExportError};
use crate::ports::outbound::KeyValueStore;

use super::locator::data_dir;

/// Name of the application database inside the data directory.
pub const APP_DB_NAME: &str = "application";

/// Open the `application` database under `<home>/data` with `backend`.
///
/// The handle is exclusive to this process for as long as it lives; locking
/// is left to the driver.
pub fn open_app_store(
    registry: &DriverRegistry,
    home: &Path,
    backend: BackendSelector,
) -> Result<Box<dyn KeyValueStore>, ExportError> {
    let dir = data_dir(home);
    tracing::debug!(
        backend = %registry.effective(backend),
        dir = %dir.display(),
        "opening application store"
    );
    registry.open(backend, APP_DB_NAME, &dir)
}
