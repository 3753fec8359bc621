//! # Storage Backend Selection
//!
//! Resolves which storage backend opens the application store.
//!
//! ## Precedence
//!
//! 1. `app-db-backend` (application-specific setting)
//! 2. `db_backend` (generic node setting)
//! 3. [`BackendSelector::Default`]
//!
//! Retired backends (`cleveldb`, `badgerdb`, `boltdb`) never resolve.

use std::fmt;

use super::errors::ExportError;

/// Backends a store driver may be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendSelector {
    /// Pure-Go LevelDB format.
    GoLevelDb,
    /// Pebble (LevelDB-compatible LSM).
    PebbleDb,
    /// RocksDB.
    RocksDb,
    /// Whatever the driver registry treats as its default backend.
    Default,
}

/// Backends that are still accepted, in the order they are advertised.
pub const ACCEPTED_BACKENDS: [BackendSelector; 3] = [
    BackendSelector::GoLevelDb,
    BackendSelector::PebbleDb,
    BackendSelector::RocksDb,
];

/// Backend names that were supported once and must now be rejected.
pub const RETIRED_BACKENDS: [&str; 3] = ["cleveldb", "badgerdb", "boltdb"];

impl BackendSelector {
    /// Configuration name of the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendSelector::GoLevelDb => "goleveldb",
            BackendSelector::PebbleDb => "pebbledb",
            BackendSelector::RocksDb => "rocksdb",
            BackendSelector::Default => "default",
        }
    }

    /// Parse an accepted backend name.
    pub fn from_name(name: &str) -> Option<Self> {
        ACCEPTED_BACKENDS
            .iter()
            .copied()
            .find(|backend| backend.as_str() == name)
    }
}

impl fmt::Display for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"goleveldb", "pebbledb", "rocksdb"`
pub fn accepted_alternatives() -> String {
    ACCEPTED_BACKENDS
        .iter()
        .map(|backend| format!("{:?}", backend.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve the backend from the application-specific and generic settings.
///
/// Empty values count as unset. Pure: performs no I/O.
///
/// # Errors
///
/// - `UnsupportedBackend` for a retired backend name
/// - `UnknownBackend` for any other unrecognized name
pub fn resolve(
    app_db_backend: Option<&str>,
    db_backend: Option<&str>,
) -> Result<BackendSelector, ExportError> {
    let chosen = [app_db_backend, db_backend]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty());

    let Some(name) = chosen else {
        return Ok(BackendSelector::Default);
    };

    if RETIRED_BACKENDS.contains(&name) {
        return Err(ExportError::UnsupportedBackend {
            name: name.to_string(),
            accepted: accepted_alternatives(),
        });
    }

    BackendSelector::from_name(name).ok_or_else(|| ExportError::UnknownBackend {
        name: name.to_string(),
        accepted: accepted_alternatives(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_resolves_to_default() {
        assert_eq!(resolve(None, None).unwrap(), BackendSelector::Default);
        assert_eq!(resolve(Some(""), Some("  ")).unwrap(), BackendSelector::Default);
    }

    #[test]
    fn test_app_backend_takes_precedence() {
        let backend = resolve(Some("rocksdb"), Some("pebbledb")).unwrap();
        assert_eq!(backend, BackendSelector::RocksDb);
    }

    #[test]
    fn test_generic_backend_used_when_app_backend_empty() {
        let backend = resolve(Some(""), Some("pebbledb")).unwrap();
        assert_eq!(backend, BackendSelector::PebbleDb);
    }

    #[test]
    fn test_retired_backends_rejected_with_alternatives() {
        for retired in RETIRED_BACKENDS {
            let err = resolve(Some(retired), None).unwrap_err();
            assert!(matches!(err, ExportError::UnsupportedBackend { .. }));

            let message = err.to_string();
            assert!(message.contains(retired));
            for accepted in ACCEPTED_BACKENDS {
                assert!(message.contains(accepted.as_str()), "{message}");
            }
        }
    }

    #[test]
    fn test_retired_generic_backend_rejected() {
        let err = resolve(None, Some("boltdb")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedBackend { .. }));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = resolve(Some("memdb2"), None).unwrap_err();
        assert!(matches!(err, ExportError::UnknownBackend { ref name, .. } if name == "memdb2"));
    }

    #[test]
    fn test_names_roundtrip() {
        for backend in ACCEPTED_BACKENDS {
            assert_eq!(BackendSelector::from_name(backend.as_str()), Some(backend));
        }
        assert_eq!(BackendSelector::from_name("default"), None);
    }
}
