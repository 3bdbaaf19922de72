//! Encoder configuration, loadable from TOML.

use crate::query::ColumnName;
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Identity column every table carries.
pub const DEFAULT_IDENTITY_COLUMN: &str = "id";

/// Column no record carries; used by the always-true predicate.
pub const DEFAULT_ALWAYS_TRUE_COLUMN: &str = "_fakeAlwaysTrue";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid encoder config: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// EncoderConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Identity column of joined tables, used for join key mapping.
    pub identity_column: ColumnName,

    /// Column probed by the always-true predicate.
    pub always_true_column: ColumnName,

    /// Compile `like` / `notLike` patterns case-insensitively.
    pub case_insensitive_like: bool,
}

impl EncoderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            identity_column: ColumnName::new(DEFAULT_IDENTITY_COLUMN),
            always_true_column: ColumnName::new(DEFAULT_ALWAYS_TRUE_COLUMN),
            case_insensitive_like: false,
        }
    }
}

///
/// TESTS
///
