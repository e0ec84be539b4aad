//! Error types for adapter domain validation and binding bookkeeping.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing adapter domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterDomainError {
    /// The adapter identity is empty after trimming.
    #[error("adapter identity must not be empty")]
    EmptyIdentity,
}

impl AdapterDomainError {
    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyIdentity => ErrorKind::InvalidArguments,
        }
    }
}

/// Result type for binding set operations.
pub type BindingSetResult<T> = Result<T, BindingSetError>;

/// Errors returned by an interface binding set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingSetError {
    /// A thread panicked while holding the set's lock.
    #[error("interface binding set lock poisoned: {0}")]
    Poisoned(String),
}

impl BindingSetError {
    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Poisoned(_) => ErrorKind::InsufficientResources,
        }
    }
}
