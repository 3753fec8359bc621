//! # Genesis Document
//!
//! The canonical bootstrap/state-snapshot file of a chain.
//!
//! ## Serialized Layout
//!
//! ```text
//! {
//!   "app_name": ..., "app_version": ..., "genesis_time": ...,
//!   "chain_id": ..., "initial_height": ...,
//!   "app_state": { opaque },
//!   "consensus": { "params": { opaque }, "validators": [...] }
//! }
//! ```
//!
//! Field order follows declaration order. Opaque records use sorted-key maps,
//! while `app_state` and `genesis_time` are kept exactly as read, so encoding
//! the same value twice yields identical bytes.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_with::{serde_as, DisplayFromStr};

use super::errors::ExportError;

/// Genesis document as read from and written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisDocument {
    /// Name of the binary that produced the document.
    #[serde(default)]
    pub app_name: String,
    /// Version of the binary that produced the document.
    #[serde(default)]
    pub app_version: String,
    /// Chain start time.
    pub genesis_time: GenesisTime,
    /// Chain identifier.
    pub chain_id: String,
    /// First block height of the chain.
    #[serde(default = "default_initial_height")]
    pub initial_height: i64,
    /// Application state, never interpreted here.
    pub app_state: Box<RawValue>,
    /// Consensus parameters and validator set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusGenesis>,
}

fn default_initial_height() -> i64 {
    1
}

impl GenesisDocument {
    /// Read and parse a genesis file.
    ///
    /// The reader is buffered; a missing file is reported by the locator
    /// before this is called, so every failure here is `InvalidGenesis`.
    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        let file = File::open(path).map_err(|e| ExportError::genesis_read(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ExportError::InvalidGenesis {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Compact JSON encoding.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ExportError> {
        serde_json::to_vec(self).map_err(ExportError::SerializationFailed)
    }
}

/// Chain start time as written in the genesis file.
///
/// The value must be RFC 3339, but the original text is what gets written
/// back: fraction digits and the UTC offset are never normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisTime {
    text: String,
    instant: DateTime<FixedOffset>,
}

impl GenesisTime {
    /// Text as read from the source document.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The instant in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }
}

impl FromStr for GenesisTime {
    type Err = chrono::ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let instant = DateTime::parse_from_rfc3339(text)?;
        Ok(Self {
            text: text.to_string(),
            instant,
        })
    }
}

impl From<DateTime<Utc>> for GenesisTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            instant: instant.into(),
        }
    }
}

impl fmt::Display for GenesisTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for GenesisTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for GenesisTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(|e| {
            de::Error::custom(format!("invalid genesis_time {:?}: {}", text, e))
        })
    }
}

/// Consensus section of the genesis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusGenesis {
    /// Consensus parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ConsensusParams>,
    /// Genesis validator set, in export order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<GenesisValidator>,
}

impl ConsensusGenesis {
    /// Build the consensus section from exported parameters and validators.
    pub fn new(params: Option<ConsensusParams>, validators: Vec<GenesisValidator>) -> Self {
        Self { params, validators }
    }
}

/// Consensus parameters record.
///
/// Kept opaque: block, evidence, validator and version limits belong to the
/// consensus engine. `serde_json::Map` sorts its keys, which keeps the
/// encoding canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsensusParams(pub serde_json::Value);

/// Validator entry of the genesis validator set.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisValidator {
    /// Consensus address (hex).
    pub address: String,
    /// Consensus public key.
    pub pub_key: ValidatorPubKey,
    /// Voting power, encoded as a decimal string.
    #[serde_as(as = "DisplayFromStr")]
    pub power: i64,
    /// Moniker.
    #[serde(default)]
    pub name: String,
}

/// Typed public key, e.g. `{"type": "tendermint/PubKeyEd25519", "value": "<base64>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorPubKey {
    /// Key type tag.
    #[serde(rename = "type")]
    pub key_type: String,
    /// Base64 key bytes.
    pub value: String,
}
