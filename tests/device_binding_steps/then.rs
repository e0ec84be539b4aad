//! Then steps for device binding BDD scenarios.

use super::world::BindingWorld;
use rstest_bdd_macros::then;

#[then(r#"the announcement carries interface id "{interface_id}""#)]
fn announcement_carries_interface_id(
    world: &BindingWorld,
    interface_id: String,
) -> Result<(), eyre::Report> {
    let announcement = world
        .last_announcement
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no announcement in scenario world"))?;
    match world.last_bind_result.as_ref() {
        Some(Ok(binding)) if binding.interface_id() == interface_id => {}
        other => return Err(eyre::eyre!("unexpected bind result: {other:?}")),
    }
    if announcement.interface_id() != Some(interface_id.as_str()) {
        return Err(eyre::eyre!(
            "expected interface id '{interface_id}', found {:?}",
            announcement.interface_id()
        ));
    }
    Ok(())
}

#[then("the announcement carries no interface id")]
fn announcement_carries_no_interface_id(world: &BindingWorld) -> Result<(), eyre::Report> {
    let announcement = world
        .last_announcement
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no announcement in scenario world"))?;
    if let Some(interface_id) = announcement.interface_id() {
        return Err(eyre::eyre!("unexpected interface id '{interface_id}'"));
    }
    Ok(())
}

#[then(r#"the interface "{interface_id}" is published"#)]
fn interface_is_published(
    world: &mut BindingWorld,
    interface_id: String,
) -> Result<(), eyre::Report> {
    let published = world
        .orchestrator()?
        .registry()
        .is_interface_id_published(&interface_id)
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if !published {
        return Err(eyre::eyre!("expected '{interface_id}' to be published"));
    }
    Ok(())
}

#[then(r#"binding fails with error kind "{kind}""#)]
fn binding_fails_with_kind(world: &BindingWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_bind_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bind result in scenario world"))?;
    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected '{kind}' failure, got {other:?}")),
    }
}

#[then("no interfaces are published")]
fn no_interfaces_published(world: &mut BindingWorld) -> Result<(), eyre::Report> {
    let interfaces = world
        .orchestrator()?
        .registry()
        .collect_all_interfaces()
        .map_err(|err| eyre::eyre!("collection failed: {err}"))?;
    if !interfaces.is_empty() {
        return Err(eyre::eyre!(
            "expected no interfaces, found {}",
            interfaces.len()
        ));
    }
    Ok(())
}

#[then("the serial adapter was shut down {count:usize} time")]
fn serial_shut_down(world: &BindingWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world.serial.shutdown_calls();
    if calls != count {
        return Err(eyre::eyre!("expected {count} shutdown calls, found {calls}"));
    }
    let reported: usize = world
        .teardown_reports
        .iter()
        .map(|report| report.adapters_shut_down)
        .sum();
    if reported != count {
        return Err(eyre::eyre!("teardown reported {reported} shutdowns"));
    }
    Ok(())
}
