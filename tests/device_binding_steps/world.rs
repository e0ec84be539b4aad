//! Shared world state for device binding BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use twin_bridge::{
    adapter::{
        adapters::InMemoryAdapter,
        domain::InterfaceBinding,
        services::{AdapterManifest, AdapterRegistry, InitializationPolicy, TeardownReport},
    },
    bridge::services::{BindingError, BindingOrchestrator},
    config::BridgeConfiguration,
    device::{domain::DiscoveryAnnouncement, services::DeviceMatchEngine},
};

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator = BindingOrchestrator<DefaultClock>;

/// Scenario world for device binding behaviour tests.
pub struct BindingWorld {
    /// Configuration assembled by the given steps.
    pub config: BridgeConfiguration,
    /// Adapters queued for the manifest.
    pub manifest: AdapterManifest,
    /// Handle onto the serial adapter's shared state.
    pub serial: InMemoryAdapter,
    /// Orchestrator built on first use.
    pub orchestrator: Option<TestOrchestrator>,
    /// Announcement passed to the last bind.
    pub last_announcement: Option<DiscoveryAnnouncement>,
    /// Result of the last bind.
    pub last_bind_result: Option<Result<InterfaceBinding, BindingError>>,
    /// Reports from teardown calls, in order.
    pub teardown_reports: Vec<TeardownReport>,
}

impl BindingWorld {
    /// Creates a world with an empty configuration and manifest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: BridgeConfiguration::new(),
            manifest: AdapterManifest::new(),
            serial: InMemoryAdapter::new(),
            orchestrator: None,
            last_announcement: None,
            last_bind_result: None,
            teardown_reports: Vec::new(),
        }
    }

    /// Returns the orchestrator, building the registry on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be built.
    pub fn orchestrator(&mut self) -> Result<&TestOrchestrator, eyre::Report> {
        if self.orchestrator.is_none() {
            let manifest = std::mem::take(&mut self.manifest);
            let registry = run_async(AdapterRegistry::build(
                manifest,
                &self.config,
                InitializationPolicy::BestEffort,
            ))
            .map_err(|err| eyre::eyre!("registry build failed: {err}"))?;
            let matcher = DeviceMatchEngine::new(Arc::new(self.config.device_catalog()));
            self.orchestrator = Some(BindingOrchestrator::new(
                Arc::new(registry),
                matcher,
                Arc::new(DefaultClock),
            ));
        }
        self.orchestrator
            .as_ref()
            .ok_or_else(|| eyre::eyre!("orchestrator missing from scenario world"))
    }
}

impl Default for BindingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BindingWorld {
    BindingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
