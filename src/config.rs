//! Engine configuration
//!
//! Loaded from an optional file plus `LEDGER_`-prefixed environment
//! variables: one `_` after the prefix, nested keys separated by `__`
//! (e.g. `LEDGER_LABELS__PENDING`, `LEDGER_LOG__FORMAT`).
//! Every key has a default, so an empty source set is valid.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub labels: DisplayLabels,
    /// Currency the spot price is quoted in
    pub fiat_currency: String,
    pub log: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            labels: DisplayLabels::default(),
            fiat_currency: DEFAULT_FIAT_CURRENCY.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build from `path` (format picked by extension) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Text shown in place of values the engine could not derive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLabels {
    pub unconfirmed: String,
    pub unknown_miner: String,
    pub pending: String,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            unconfirmed: UNCONFIRMED_LABEL.to_string(),
            unknown_miner: UNKNOWN_MINER_LABEL.to_string(),
            pending: PENDING_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
