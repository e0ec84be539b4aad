//! Match engine outcomes.

use crate::error::ErrorKind;
use thiserror::Error;

/// Result type for device matching.
pub type MatchResult<T> = Result<T, MatchError>;

/// Reasons an announcement could not be resolved to one device entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// No configured device matched the announcement.
    #[error("no configured device matches the announcement")]
    NoMatch,

    /// Two configured devices owned by the same adapter matched.
    #[error(
        "configured devices {first} and {second} both match the announcement for adapter '{identity}'"
    )]
    Ambiguous {
        /// Adapter identity shared by both entries.
        identity: String,
        /// Index of the entry recorded first.
        first: usize,
        /// Index of the conflicting entry.
        second: usize,
    },
}

impl MatchError {
    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoMatch => ErrorKind::NoMatch,
            Self::Ambiguous { .. } => ErrorKind::Ambiguous,
        }
    }
}
