//! Discovery announcements describing one device sighting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A transient record emitted by a discovery source for one device sighting.
///
/// Discriminators are read by the match engine. The interface id slot is
/// written only by the match engine when a non-wildcard entry matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryAnnouncement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default)]
    match_parameters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface_id: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

impl DiscoveryAnnouncement {
    /// Creates an announcement with no discriminators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an announcement from discriminator name/value pairs.
    #[must_use]
    pub fn from_discriminators<K, V>(discriminators: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            match_parameters: discriminators
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Adds or replaces a discriminator.
    #[must_use]
    pub fn with_discriminator(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_parameters.insert(name.into(), value.into());
        self
    }

    /// Records which discovery source produced the announcement.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches an opaque payload forwarded to the adapter untouched.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Returns the observed value of a discriminator.
    #[must_use]
    pub fn discriminator(&self, name: &str) -> Option<&str> {
        self.match_parameters.get(name).map(String::as_str)
    }

    /// Returns all discriminators ordered by name.
    #[must_use]
    pub const fn discriminators(&self) -> &BTreeMap<String, String> {
        &self.match_parameters
    }

    /// Returns the discovery source, if recorded.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the interface id resolved by the match engine.
    #[must_use]
    pub fn interface_id(&self) -> Option<&str> {
        self.interface_id.as_deref()
    }

    /// Returns the opaque payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    pub(crate) fn assign_interface_id(&mut self, interface_id: &str) {
        self.interface_id = Some(interface_id.to_owned());
    }
}
