//! When steps for device binding BDD scenarios.

use super::world::{BindingWorld, run_async};
use rstest_bdd_macros::when;
use twin_bridge::device::domain::DiscoveryAnnouncement;

#[when(r#"an announcement with vendorId "{vendor_id}" is bound"#)]
fn announcement_is_bound(world: &mut BindingWorld, vendor_id: String) -> Result<(), eyre::Report> {
    let mut announcement = DiscoveryAnnouncement::new()
        .with_discriminator("vendorId", vendor_id)
        .with_source("scenario");
    let orchestrator = world.orchestrator()?;
    let result = run_async(orchestrator.bind(&mut announcement));
    world.last_bind_result = Some(result);
    world.last_announcement = Some(announcement);
    Ok(())
}

#[when("the registry is torn down twice")]
fn registry_torn_down_twice(world: &mut BindingWorld) -> Result<(), eyre::Report> {
    let orchestrator = world.orchestrator()?;
    let first = run_async(orchestrator.registry().teardown());
    let second = run_async(orchestrator.registry().teardown());
    world.teardown_reports.extend([first, second]);
    Ok(())
}
