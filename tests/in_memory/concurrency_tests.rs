//! Concurrent binding, lookup, and release against one shared registry.

use std::sync::Arc;

use super::helpers::{TestOrchestrator, orchestrator_for};
use twin_bridge::{
    adapter::{adapters::InMemoryAdapter, domain::InterfaceBinding, services::AdapterManifest},
    config::BridgeConfiguration,
    device::domain::{DeviceConfigEntry, DiscoveryAnnouncement, MatchFilter},
};

const TASKS: usize = 8;
const BINDS_PER_TASK: usize = 16;

async fn shared_orchestrator(adapter: InMemoryAdapter) -> Arc<TestOrchestrator> {
    let config = BridgeConfiguration::new().with_device(
        DeviceConfigEntry::for_adapter("serial")
            .with_interface_id("urn:serial:any")
            .with_match_filter(MatchFilter::wildcard()),
    );
    let manifest = AdapterManifest::new().with_adapter("serial", adapter);
    Arc::new(orchestrator_for(&config, manifest).await)
}

async fn bind_concurrently(orchestrator: &Arc<TestOrchestrator>) -> Vec<InterfaceBinding> {
    let mut tasks = Vec::with_capacity(TASKS);
    for task in 0..TASKS {
        let shared = Arc::clone(orchestrator);
        tasks.push(tokio::spawn(async move {
            let mut bindings = Vec::with_capacity(BINDS_PER_TASK);
            for sighting in 0..BINDS_PER_TASK {
                let mut announcement = DiscoveryAnnouncement::new()
                    .with_discriminator("port", format!("COM{task}-{sighting}"));
                bindings.push(
                    shared
                        .bind(&mut announcement)
                        .await
                        .expect("wildcard device should bind"),
                );
                assert!(
                    shared
                        .registry()
                        .is_interface_id_published("URN:SERIAL:ANY")
                        .expect("lookup should succeed")
                );
            }
            bindings
        }));
    }

    let mut bindings = Vec::with_capacity(TASKS * BINDS_PER_TASK);
    for task in tasks {
        bindings.extend(task.await.expect("binding task should not panic"));
    }
    bindings
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_binds_are_all_recorded() {
    let adapter = InMemoryAdapter::new();
    let orchestrator = shared_orchestrator(adapter.clone()).await;

    let bindings = bind_concurrently(&orchestrator).await;

    let registry = orchestrator.registry();
    assert_eq!(bindings.len(), TASKS * BINDS_PER_TASK);
    assert_eq!(
        registry.binding_count().expect("count should succeed"),
        TASKS * BINDS_PER_TASK
    );
    assert_eq!(
        registry
            .collect_all_interfaces()
            .expect("collection should succeed")
            .len(),
        TASKS * BINDS_PER_TASK
    );
    assert_eq!(adapter.create_calls(), TASKS * BINDS_PER_TASK);
    registry.teardown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_releases_leave_only_unreleased_bindings() {
    let adapter = InMemoryAdapter::new();
    let orchestrator = shared_orchestrator(adapter.clone()).await;
    let bindings = bind_concurrently(&orchestrator).await;
    let (released, kept): (Vec<_>, Vec<_>) = bindings
        .into_iter()
        .enumerate()
        .partition(|(position, _)| position & 1 == 0);

    let mut tasks = Vec::with_capacity(released.len());
    for (_, binding) in released {
        let shared = Arc::clone(&orchestrator);
        tasks.push(tokio::spawn(async move {
            shared.unbind(&binding).await.expect("unbind should succeed");
        }));
    }
    for task in tasks {
        task.await.expect("release task should not panic");
    }

    let registry = orchestrator.registry();
    let remaining = registry
        .collect_all_interfaces()
        .expect("collection should succeed");
    assert_eq!(remaining.len(), kept.len());
    assert!(
        kept.iter()
            .all(|(_, binding)| remaining.contains(binding.handle()))
    );
    assert_eq!(adapter.live_interface_ids().len(), kept.len());

    let teardown = registry.teardown().await;
    assert_eq!(teardown.adapters_shut_down, 1);
    assert_eq!(teardown.bindings_swept, kept.len());
}
