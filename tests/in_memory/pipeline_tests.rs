//! Configuration-to-binding pipeline tests.

use super::helpers::{SAMPLE_DOCUMENT, orchestrator_for, sample_configuration, vendor_announcement};
use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use rstest::rstest;
use serde_json::json;
use twin_bridge::{
    adapter::{adapters::InMemoryAdapter, services::AdapterManifest},
    config::{self, BridgeConfiguration},
    device::domain::DiscoveryAnnouncement,
};
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn document_drives_adapter_initialization_and_binding(
    sample_configuration: BridgeConfiguration,
) {
    let report = config::validate(&sample_configuration).expect("sample should validate");
    assert!(report.is_clean());
    assert_eq!(
        sample_configuration.connection_string(),
        Some("HostName=edge.example;DeviceId=bridge-01")
    );

    let serial = InMemoryAdapter::new();
    let usb = InMemoryAdapter::new();
    let manifest = AdapterManifest::new()
        .with_adapter("serial", serial.clone())
        .with_adapter("usb", usb.clone());
    let orchestrator = orchestrator_for(&sample_configuration, manifest).await;

    let ports = serial
        .parameters()
        .and_then(|parameters| parameters.get("ports").cloned());
    assert_eq!(ports, Some(json!(["COM1", "COM2"])));

    let mut announcement = vendor_announcement("ABCD-1234");
    let binding = orchestrator
        .bind(&mut announcement)
        .await
        .expect("serial device should bind");

    assert_eq!(announcement.interface_id(), Some("iface1"));
    assert_eq!(binding.interface_id(), "iface1");
    assert_eq!(serial.live_interface_ids(), vec!["iface1".to_owned()]);
    assert!(usb.live_interface_ids().is_empty());

    let teardown = orchestrator.registry().teardown().await;
    assert_eq!(teardown.adapters_shut_down, 2);
    assert_eq!(teardown.bindings_swept, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catch_all_device_uses_its_configured_interface_id(
    sample_configuration: BridgeConfiguration,
) {
    let usb = InMemoryAdapter::new();
    let manifest = AdapterManifest::new()
        .with_adapter("serial", InMemoryAdapter::new())
        .with_adapter("usb", usb.clone());
    let orchestrator = orchestrator_for(&sample_configuration, manifest).await;
    let mut announcement = DiscoveryAnnouncement::new().with_discriminator("productId", "0042");

    let binding = orchestrator
        .bind(&mut announcement)
        .await
        .expect("catch-all device should bind");

    assert_eq!(announcement.interface_id(), None);
    assert_eq!(binding.interface_id(), "urn:usb:generic");
    assert_eq!(usb.live_interface_ids(), vec!["urn:usb:generic".to_owned()]);
    orchestrator.registry().teardown().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn serial_match_wins_over_catch_all_of_another_adapter(
    sample_configuration: BridgeConfiguration,
) {
    let usb = InMemoryAdapter::new();
    let manifest = AdapterManifest::new()
        .with_adapter("serial", InMemoryAdapter::new())
        .with_adapter("usb", usb.clone());
    let orchestrator = orchestrator_for(&sample_configuration, manifest).await;

    orchestrator
        .bind(&mut vendor_announcement("ABCD"))
        .await
        .expect("serial device should bind");

    assert_eq!(usb.create_calls(), 0);
    orchestrator.registry().teardown().await;
}

#[test]
fn document_loaded_from_disk_matches_parsed_document() {
    let dir_path =
        Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("temp dir should be UTF-8");
    let dir = Dir::open_ambient_dir(&dir_path, ambient_authority()).expect("temp dir should open");
    let file_name = format!("twin-bridge-{}.json", Uuid::new_v4());
    dir.write(&file_name, SAMPLE_DOCUMENT)
        .expect("document should be written");

    let result = config::load_from_path(&dir_path.join(&file_name));
    dir.remove_file(&file_name).expect("document should be removed");

    let loaded = result.expect("document should load");
    assert_eq!(loaded, sample_configuration());
    assert_eq!(
        loaded
            .discovery_parameters("serial-discovery")
            .and_then(|parameters| parameters.identity()),
        Some("serial-discovery")
    );
}
