//! Chain Configuration
//!
//! Parameters that stay constant across a whole chain. Loaded from defaults,
//! environment variables or a JSON file; the CLI layers its flags on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::seed::{HouseEdge, InputError, Salt};

/// Environment variable holding the salt.
pub const ENV_SALT: &str = "CRASH_SALT";
/// Environment variable holding the house edge percentage.
pub const ENV_HOUSE_EDGE: &str = "CRASH_HOUSE_EDGE";
/// Environment variable holding the chain length.
pub const ENV_CHAIN_LENGTH: &str = "CRASH_CHAIN_LENGTH";

/// Default number of entries to generate.
pub const DEFAULT_CHAIN_LENGTH: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`ChainConfig`].
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable holds an unusable value.
    #[error("invalid value {value:?} for {name}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
    },

    /// Salt or house edge rejected.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Chain-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Salt folded into each seed (empty for unsalted chains).
    pub salt: Salt,
    /// House edge in percent.
    pub house_edge: HouseEdge,
    /// Number of entries to generate.
    pub length: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            salt: Salt::none(),
            house_edge: HouseEdge::default(),
            length: DEFAULT_CHAIN_LENGTH,
        }
    }
}

impl ChainConfig {
    /// Defaults overridden by any `CRASH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Override fields from any `CRASH_*` environment variables that are set.
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(salt) = std::env::var(ENV_SALT) {
            self.salt = Salt::parse(salt)?;
        }
        if let Ok(edge) = std::env::var(ENV_HOUSE_EDGE) {
            self.house_edge = edge.parse()?;
        }
        if let Ok(length) = std::env::var(ENV_CHAIN_LENGTH) {
            self.length = length.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: ENV_CHAIN_LENGTH,
                value: length.clone(),
            })?;
        }
        Ok(self)
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
