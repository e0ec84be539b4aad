//! Statically configured device entries and their match filters.

use crate::config::ParameterBlock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Match type that accepts every announcement.
pub const WILDCARD_MATCH_TYPE: &str = "*";

/// Criteria deciding whether an announcement belongs to a device entry.
///
/// Expected parameters keep their declaration order; the match engine
/// evaluates them in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilter {
    match_type: String,
    #[serde(default)]
    match_parameters: Map<String, Value>,
}

impl MatchFilter {
    /// Creates a filter that matches any announcement.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            match_type: WILDCARD_MATCH_TYPE.to_owned(),
            match_parameters: Map::new(),
        }
    }

    /// Creates a discriminator filter with no expected parameters.
    #[must_use]
    pub fn discriminator(match_type: impl Into<String>) -> Self {
        Self {
            match_type: match_type.into(),
            match_parameters: Map::new(),
        }
    }

    /// Appends an expected parameter: the announcement value must contain
    /// `expected` as a substring.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, expected: impl Into<String>) -> Self {
        self.match_parameters
            .insert(name.into(), Value::String(expected.into()));
        self
    }

    /// Returns the declared match type.
    #[must_use]
    pub fn match_type(&self) -> &str {
        &self.match_type
    }

    /// Returns whether this filter matches every announcement.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.match_type == WILDCARD_MATCH_TYPE
    }

    /// Iterates expected parameters in declaration order.
    ///
    /// Values that are not JSON strings are yielded as `None`; they can
    /// never be satisfied.
    pub fn expected_parameters(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.match_parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of expected parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.match_parameters.len()
    }
}

/// One statically configured device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfigEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    self_describing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_filters: Option<MatchFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    adapter_parameters: Option<ParameterBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discovery_parameters: Option<ParameterBlock>,
}

impl DeviceConfigEntry {
    /// Creates an empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry owned by the adapter with the given identity.
    #[must_use]
    pub fn for_adapter(identity: impl Into<String>) -> Self {
        Self::new().with_adapter_parameters(ParameterBlock::for_identity(identity))
    }

    /// Sets the interface id published for this device.
    #[must_use]
    pub fn with_interface_id(mut self, interface_id: impl Into<String>) -> Self {
        self.interface_id = Some(interface_id.into());
        self
    }

    /// Marks the device as publishing its own interface description.
    #[must_use]
    pub const fn self_describing(mut self) -> Self {
        self.self_describing = true;
        self
    }

    /// Sets the match filter.
    #[must_use]
    pub fn with_match_filter(mut self, filter: MatchFilter) -> Self {
        self.match_filters = Some(filter);
        self
    }

    /// Replaces the adapter parameter block.
    #[must_use]
    pub fn with_adapter_parameters(mut self, parameters: ParameterBlock) -> Self {
        self.adapter_parameters = Some(parameters);
        self
    }

    /// Adds one adapter-specific parameter.
    #[must_use]
    pub fn with_adapter_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let block = self.adapter_parameters.take().unwrap_or_default();
        self.adapter_parameters = Some(block.with(key, value));
        self
    }

    /// Sets the discovery parameter block.
    #[must_use]
    pub fn with_discovery_parameters(mut self, parameters: ParameterBlock) -> Self {
        self.discovery_parameters = Some(parameters);
        self
    }

    /// Returns the declared interface id.
    #[must_use]
    pub fn interface_id(&self) -> Option<&str> {
        self.interface_id.as_deref()
    }

    /// Returns whether the device describes its own interface.
    #[must_use]
    pub const fn is_self_describing(&self) -> bool {
        self.self_describing
    }

    /// Returns the match filter, if declared.
    #[must_use]
    pub const fn match_filter(&self) -> Option<&MatchFilter> {
        self.match_filters.as_ref()
    }

    /// Returns the adapter-specific parameters.
    #[must_use]
    pub const fn adapter_parameters(&self) -> Option<&ParameterBlock> {
        self.adapter_parameters.as_ref()
    }

    /// Returns the discovery parameters.
    #[must_use]
    pub const fn discovery_parameters(&self) -> Option<&ParameterBlock> {
        self.discovery_parameters.as_ref()
    }

    /// Returns the identity of the adapter that owns this device.
    #[must_use]
    pub fn adapter_identity(&self) -> Option<&str> {
        self.adapter_parameters
            .as_ref()
            .and_then(ParameterBlock::identity)
    }
}
