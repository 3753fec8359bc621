//! # Export Request & Result
//!
//! Values passed across the exporter boundary. The pipeline builds an
//! [`ExportRequest`] and receives exactly one [`ExportedState`] back; it never
//! interprets either beyond moving them along.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::value::RawValue;

use super::errors::ExportError;
use super::genesis::{ConsensusParams, GenesisValidator};

/// Flag value meaning "latest committed height".
pub const LATEST_HEIGHT: i64 = -1;

/// Height to export state from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportHeight {
    /// Latest committed height (flag value `-1`).
    #[default]
    Latest,
    /// A specific height.
    At(u64),
}

impl ExportHeight {
    /// Interpret the `--height` flag value.
    pub fn from_flag(height: i64) -> Result<Self, ExportError> {
        match height {
            LATEST_HEIGHT => Ok(ExportHeight::Latest),
            h => u64::try_from(h)
                .map(ExportHeight::At)
                .map_err(|_| ExportError::InvalidHeight(h)),
        }
    }

    /// Flag encoding, `-1` for latest.
    pub fn as_i64(&self) -> i64 {
        match self {
            ExportHeight::Latest => LATEST_HEIGHT,
            ExportHeight::At(h) => i64::try_from(*h).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for ExportHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportHeight::Latest => f.write_str("latest"),
            ExportHeight::At(h) => write!(f, "{}", h),
        }
    }
}

/// Which modules the exporter should include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModuleFilter {
    /// Every registered module.
    #[default]
    All,
    /// Only the named modules. Unknown names are the exporter's to reject.
    Only(BTreeSet<String>),
}

impl ModuleFilter {
    /// Build a filter from the `--modules-to-export` values.
    ///
    /// Blank entries are dropped; no remaining names means all modules.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let modules: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if modules.is_empty() {
            ModuleFilter::All
        } else {
            ModuleFilter::Only(modules)
        }
    }

    /// Whether `module` passes the filter.
    pub fn includes(&self, module: &str) -> bool {
        match self {
            ModuleFilter::All => true,
            ModuleFilter::Only(modules) => modules.contains(module),
        }
    }
}

/// Parameters handed to the exporter, unchanged from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    /// Height to export from.
    pub height: ExportHeight,
    /// Renormalize state for a restart at height zero.
    pub for_zero_height: bool,
    /// Validator operators exempt from forced unjailing during zero-height
    /// renormalization.
    pub jail_allowed_addrs: BTreeSet<String>,
    /// Module selection.
    pub modules: ModuleFilter,
}

/// Point-in-time application state returned by the exporter.
#[derive(Debug, Clone)]
pub struct ExportedState {
    /// Serialized application state.
    pub app_state: Box<RawValue>,
    /// Height the state was exported at; becomes `initial_height`.
    pub height: i64,
    /// Consensus parameters in effect at that height.
    pub consensus_params: Option<ConsensusParams>,
    /// Validator set at that height.
    pub validators: Vec<GenesisValidator>,
}

/// Identity of the running binary, stamped into every exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Binary name.
    pub app_name: String,
    /// Binary version.
    pub version: String,
}

impl BuildInfo {
    /// Identity from explicit values.
    pub fn new(app_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_flag_latest() {
        let height = ExportHeight::from_flag(-1).unwrap();
        assert_eq!(height, ExportHeight::Latest);
        assert_eq!(height.as_i64(), -1);
    }

    #[test]
    fn test_height_flag_specific() {
        assert_eq!(ExportHeight::from_flag(0).unwrap(), ExportHeight::At(0));
        assert_eq!(ExportHeight::from_flag(1200).unwrap().as_i64(), 1200);
    }

    #[test]
    fn test_height_flag_below_sentinel_rejected() {
        assert!(matches!(
            ExportHeight::from_flag(-2),
            Err(ExportError::InvalidHeight(-2))
        ));
    }

    #[test]
    fn test_empty_module_list_means_all() {
        assert_eq!(ModuleFilter::from_names(Vec::<String>::new()), ModuleFilter::All);
        assert_eq!(ModuleFilter::from_names(["", " "]), ModuleFilter::All);
    }

    #[test]
    fn test_single_module_filter() {
        let filter = ModuleFilter::from_names(["bank"]);
        assert_eq!(
            filter,
            ModuleFilter::Only(BTreeSet::from(["bank".to_string()]))
        );
        assert!(filter.includes("bank"));
        assert!(!filter.includes("staking"));
    }
}
