//! Identifier types for adapters, runtimes, handles, and bindings.

use super::AdapterDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Validated adapter identity.
///
/// The identity is trimmed and must not be empty. Case is preserved; registry
/// lookups are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdapterIdentity(String);

impl AdapterIdentity {
    /// Creates a validated adapter identity.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyIdentity`] when the identity is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdapterDomainError::EmptyIdentity);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AdapterIdentity {
    type Error = AdapterDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdapterIdentity> for String {
    fn from(identity: AdapterIdentity) -> Self {
        identity.0
    }
}

impl AsRef<str> for AdapterIdentity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for AdapterIdentity {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AdapterIdentity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Position of an adapter runtime inside its registry.
///
/// Bindings refer back to their runtime through this key instead of holding
/// a reference, so the registry stays the sole owner of runtimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeKey(usize);

impl RuntimeKey {
    /// Creates a key from a manifest position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the manifest position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuntimeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "runtime#{}", self.0)
    }
}

/// Unique identifier of an adapter-created interface handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceHandleId(Uuid);

impl InterfaceHandleId {
    /// Creates a new random handle identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a handle identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for InterfaceHandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InterfaceHandleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Membership of a binding in its owning binding set.
///
/// Tokens are issued by the set and are only meaningful for removal from
/// that same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MembershipToken(u64);

impl MembershipToken {
    pub(crate) const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the issue sequence number of the token.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}
