//! Error types for configuration loading and validation.

use crate::error::ErrorKind;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Errors returned while loading or validating bridge configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    /// The configuration path does not name a file.
    #[error("configuration path '{0}' does not name a file")]
    InvalidPath(Utf8PathBuf),

    /// The configuration file could not be read.
    #[error("failed to read configuration from '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: Arc<std::io::Error>,
    },

    /// The configuration text is not a valid configuration document.
    #[error("malformed configuration document: {0}")]
    Parse(Arc<serde_json::Error>),

    /// A device entry is missing a mandatory field.
    #[error("device {device_index} is invalid: {reason}")]
    Invalid {
        /// Position of the offending entry in the `devices` list.
        device_index: usize,
        /// Human-readable reason.
        reason: String,
    },
}

impl ConfigurationError {
    /// Wraps an I/O failure encountered while reading `path`.
    pub fn read(path: &Utf8Path, err: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source: Arc::new(err),
        }
    }

    /// Wraps a JSON deserialization failure.
    pub fn parse(err: serde_json::Error) -> Self {
        Self::Parse(Arc::new(err))
    }

    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath(_) => ErrorKind::InvalidArguments,
            Self::Read { .. } | Self::Parse(_) | Self::Invalid { .. } => {
                ErrorKind::ConfigurationInvalid
            }
        }
    }
}
