//! Crate-wide error classification.
//!
//! Each bounded context owns its own error enums. [`ErrorKind`] gives callers
//! a stable, coarse classification across all of them, so a discovery loop
//! can decide how to react without matching on every module's variants.

use std::fmt;

/// Coarse classification shared by every error type in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Null, empty, or malformed input.
    InvalidArguments,
    /// A mandatory configuration field is missing or malformed.
    ConfigurationInvalid,
    /// Two adapters share an identity.
    DuplicateEntry,
    /// An identity, runtime, or interface lookup missed.
    NotFound,
    /// No configured device entry matched an announcement.
    NoMatch,
    /// More than one configured device entry matched an announcement.
    Ambiguous,
    /// An adapter callback reported a failure.
    AdapterFailure,
    /// A resource could not be acquired.
    InsufficientResources,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArguments => "invalid_arguments",
            Self::ConfigurationInvalid => "configuration_invalid",
            Self::DuplicateEntry => "duplicate_entry",
            Self::NotFound => "not_found",
            Self::NoMatch => "no_match",
            Self::Ambiguous => "ambiguous",
            Self::AdapterFailure => "adapter_failure",
            Self::InsufficientResources => "insufficient_resources",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
