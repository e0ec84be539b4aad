//! Configuration document model.

use super::{ConfigurationError, ConfigurationResult, ParameterBlock};
use crate::device::domain::{DeviceCatalog, DeviceConfigEntry};
use serde::{Deserialize, Serialize};

/// Settings for the upstream digital-twin connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeParameters {
    /// Connection string for the upstream service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

/// The full bridge configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bridge: Option<BridgeParameters>,
    #[serde(default)]
    devices: Vec<DeviceConfigEntry>,
    #[serde(default)]
    adapters: Vec<ParameterBlock>,
    #[serde(default)]
    discovery_adapters: Vec<ParameterBlock>,
}

impl BridgeConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Parse`] when the text is not a valid
    /// configuration document.
    pub fn from_json_str(text: &str) -> ConfigurationResult<Self> {
        serde_json::from_str(text).map_err(ConfigurationError::parse)
    }

    /// Sets the upstream connection string.
    #[must_use]
    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.bridge = Some(BridgeParameters {
            connection_string: Some(connection_string.into()),
        });
        self
    }

    /// Appends a configured device entry.
    #[must_use]
    pub fn with_device(mut self, device: DeviceConfigEntry) -> Self {
        self.devices.push(device);
        self
    }

    /// Appends an adapter initialization parameter block.
    #[must_use]
    pub fn with_adapter_parameters(mut self, parameters: ParameterBlock) -> Self {
        self.adapters.push(parameters);
        self
    }

    /// Appends a discovery adapter parameter block.
    #[must_use]
    pub fn with_discovery_parameters(mut self, parameters: ParameterBlock) -> Self {
        self.discovery_adapters.push(parameters);
        self
    }

    /// Returns the configured devices in declaration order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceConfigEntry] {
        &self.devices
    }

    /// Builds the device catalog consumed by the match engine.
    #[must_use]
    pub fn device_catalog(&self) -> DeviceCatalog {
        DeviceCatalog::new(self.devices.clone())
    }

    /// Returns the upstream connection string, when configured.
    #[must_use]
    pub fn connection_string(&self) -> Option<&str> {
        self.bridge
            .as_ref()
            .and_then(|bridge| bridge.connection_string.as_deref())
    }

    /// Returns the initialization parameters declared for an adapter.
    ///
    /// The identity comparison is exact. An absent block is valid and
    /// yields `None`.
    #[must_use]
    pub fn adapter_parameters(&self, identity: &str) -> Option<&ParameterBlock> {
        find_by_identity(&self.adapters, identity)
    }

    /// Returns the parameters declared for a discovery adapter.
    #[must_use]
    pub fn discovery_parameters(&self, identity: &str) -> Option<&ParameterBlock> {
        find_by_identity(&self.discovery_adapters, identity)
    }
}

fn find_by_identity<'a>(blocks: &'a [ParameterBlock], identity: &str) -> Option<&'a ParameterBlock> {
    blocks
        .iter()
        .find(|block| block.identity() == Some(identity))
}
