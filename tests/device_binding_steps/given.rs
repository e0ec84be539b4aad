//! Given steps for device binding BDD scenarios.

use super::world::BindingWorld;
use rstest_bdd_macros::given;
use twin_bridge::device::domain::{DeviceConfigEntry, MatchFilter};

#[given("a serial adapter is registered")]
fn serial_adapter_registered(world: &mut BindingWorld) {
    let manifest = std::mem::take(&mut world.manifest);
    world.manifest = manifest.with_adapter("serial", world.serial.clone());
}

#[given(r#"a device "{interface_id}" for adapter "{identity}" matching vendorId "{vendor_id}""#)]
fn device_matching_vendor(
    world: &mut BindingWorld,
    interface_id: String,
    identity: String,
    vendor_id: String,
) {
    let device = DeviceConfigEntry::for_adapter(identity)
        .with_interface_id(interface_id)
        .with_match_filter(MatchFilter::discriminator("vendorId").with_parameter("vendorId", vendor_id));
    let config = std::mem::take(&mut world.config);
    world.config = config.with_device(device);
}
