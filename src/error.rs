//! Error types for the fallible edges of the crate.
//!
//! The simulation itself is total: `advance` never fails. Only loading and
//! validating a [`SimConfig`](crate::SimConfig) can go wrong.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading or validating a simulation config.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        /// File that was being read.
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config text is not valid JSON for [`SimConfig`](crate::SimConfig).
    Parse(serde_json::Error),

    /// A field parsed but its value is outside the accepted range.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of what was expected.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "malformed config: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
