//! Shared test helpers for in-memory bridge integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use twin_bridge::{
    adapter::services::{AdapterManifest, AdapterRegistry, InitializationPolicy},
    bridge::services::BindingOrchestrator,
    config::BridgeConfiguration,
    device::{domain::DiscoveryAnnouncement, services::DeviceMatchEngine},
};

/// Orchestrator type used across integration tests.
pub type TestOrchestrator = BindingOrchestrator<DefaultClock>;

/// Configuration document with one serial device, one USB catch-all, and
/// parameter blocks for both adapters.
pub const SAMPLE_DOCUMENT: &str = r#"{
  "bridge": { "connectionString": "HostName=edge.example;DeviceId=bridge-01" },
  "devices": [
    {
      "interfaceId": "iface1",
      "matchFilters": {
        "matchType": "vendorId",
        "matchParameters": { "vendorId": "ABCD" }
      },
      "adapterParameters": { "identity": "serial", "baudRate": 115200 },
      "discoveryParameters": { "identity": "serial-discovery" }
    },
    {
      "interfaceId": "urn:usb:generic",
      "matchFilters": { "matchType": "*" },
      "adapterParameters": { "identity": "usb" }
    }
  ],
  "adapters": [
    { "identity": "serial", "ports": ["COM1", "COM2"] },
    { "identity": "usb" }
  ],
  "discoveryAdapters": [ { "identity": "serial-discovery" } ]
}"#;

/// Provides the parsed sample configuration.
#[fixture]
pub fn sample_configuration() -> BridgeConfiguration {
    BridgeConfiguration::from_json_str(SAMPLE_DOCUMENT).expect("sample document should parse")
}

/// Builds a best-effort registry and an orchestrator over `config`.
pub async fn orchestrator_for(
    config: &BridgeConfiguration,
    manifest: AdapterManifest,
) -> TestOrchestrator {
    let registry = AdapterRegistry::build(manifest, config, InitializationPolicy::BestEffort)
        .await
        .expect("registry should build");
    let matcher = DeviceMatchEngine::new(Arc::new(config.device_catalog()));
    BindingOrchestrator::new(Arc::new(registry), matcher, Arc::new(DefaultClock))
}

/// Creates an announcement carrying a `vendorId` discriminator.
pub fn vendor_announcement(vendor_id: &str) -> DiscoveryAnnouncement {
    DiscoveryAnnouncement::new()
        .with_discriminator("vendorId", vendor_id)
        .with_source("serial-discovery")
}
