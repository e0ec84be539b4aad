//! Adapter registry: manifest validation, initialization, lookup, and
//! teardown.

use super::{AdapterManifest, AdapterRuntime, AdapterRuntimeState};
use crate::adapter::{
    domain::{
        AdapterDomainError, AdapterIdentity, BindingSetError, InterfaceBinding, InterfaceHandle,
        InterfaceHandleId, RuntimeKey,
    },
    ports::{AdapterContext, AdapterPluginError},
};
use crate::config::BridgeConfiguration;
use crate::device::domain::DiscoveryAnnouncement;
use crate::error::ErrorKind;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// What the registry does when an adapter fails to initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitializationPolicy {
    /// Log the failure and continue without the adapter.
    #[default]
    BestEffort,
    /// Shut down the adapters initialized so far and fail the build.
    Strict,
}

/// Service-level errors for adapter registry operations.
#[derive(Debug, Clone, Error)]
pub enum AdapterRegistryError {
    /// A manifest entry failed validation.
    #[error("adapter at manifest position {position} is invalid: {source}")]
    InvalidAdapter {
        /// Position of the descriptor in the manifest.
        position: usize,
        /// Validation failure.
        source: AdapterDomainError,
    },

    /// Two manifest entries share an identity.
    #[error("duplicate adapter identity '{identity}' at manifest position {position}")]
    DuplicateIdentity {
        /// Position of the second descriptor.
        position: usize,
        /// The shared identity.
        identity: AdapterIdentity,
    },

    /// An adapter failed to initialize under the strict policy.
    #[error("adapter '{identity}' failed to initialize: {source}")]
    InitializationFailed {
        /// Adapter identity.
        identity: AdapterIdentity,
        /// Failure reported by the adapter.
        source: AdapterPluginError,
    },

    /// No initialized adapter has the requested identity.
    #[error("adapter '{0}' is not registered")]
    AdapterNotFound(String),

    /// The runtime key does not belong to this registry.
    #[error("{0} does not exist")]
    RuntimeNotFound(RuntimeKey),

    /// The adapter is not accepting interface requests.
    #[error("adapter '{identity}' is not initialized (current state: {state})")]
    NotInitialized {
        /// Adapter identity.
        identity: AdapterIdentity,
        /// Current lifecycle state.
        state: AdapterRuntimeState,
    },

    /// The binding was never registered into a binding set.
    #[error("interface {0} has no binding set membership")]
    UnregisteredBinding(InterfaceHandleId),

    /// An adapter callback failed.
    #[error("adapter '{identity}' failed: {source}")]
    Adapter {
        /// Adapter identity.
        identity: AdapterIdentity,
        /// Failure reported by the adapter.
        source: AdapterPluginError,
    },

    /// A binding set operation failed.
    #[error(transparent)]
    BindingSet(#[from] BindingSetError),
}

impl AdapterRegistryError {
    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAdapter { .. } | Self::UnregisteredBinding(_) => {
                ErrorKind::InvalidArguments
            }
            Self::DuplicateIdentity { .. } => ErrorKind::DuplicateEntry,
            Self::AdapterNotFound(_) | Self::RuntimeNotFound(_) | Self::NotInitialized { .. } => {
                ErrorKind::NotFound
            }
            Self::InitializationFailed { source, .. } | Self::Adapter { source, .. } => {
                source.kind()
            }
            Self::BindingSet(err) => err.kind(),
        }
    }
}

/// Result type for adapter registry operations.
pub type AdapterRegistryResult<T> = Result<T, AdapterRegistryError>;

/// Outcome of [`AdapterRegistry::teardown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownReport {
    /// Adapters whose `shutdown` was invoked by this call.
    pub adapters_shut_down: usize,
    /// Bindings discarded from binding sets by this call.
    pub bindings_swept: usize,
}

/// Owns every adapter runtime and resolves identities to runtimes.
///
/// The registry is built once, single-threaded, before discovery starts.
/// Afterwards the identity index is read-only and needs no lock; mutation is
/// confined to each runtime's own binding set. Adapter callbacks are never
/// invoked while a registry lock is held.
///
/// [`teardown`](Self::teardown) must only be called once the caller has
/// stopped issuing new interface requests.
#[derive(Debug)]
pub struct AdapterRegistry {
    runtimes: Vec<AdapterRuntime>,
    index: HashMap<AdapterIdentity, RuntimeKey>,
}

impl AdapterRegistry {
    /// Validates the manifest and initializes every adapter in order.
    ///
    /// The whole manifest is validated before any adapter is initialized,
    /// so a validation failure leaves every plugin untouched. Each adapter
    /// receives the parameter block configured for its identity.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::InvalidAdapter`] for a blank identity,
    /// [`AdapterRegistryError::DuplicateIdentity`] for a repeated identity,
    /// and, under [`InitializationPolicy::Strict`],
    /// [`AdapterRegistryError::InitializationFailed`] when an adapter fails to
    /// initialize.
    pub async fn build(
        manifest: AdapterManifest,
        config: &BridgeConfiguration,
        policy: InitializationPolicy,
    ) -> AdapterRegistryResult<Self> {
        let runtimes = validate_manifest(manifest)?;
        let mut index = HashMap::with_capacity(runtimes.len());

        for runtime in &runtimes {
            let identity = runtime.identity();
            let parameters = config.adapter_parameters(identity.as_str()).cloned();
            debug!(
                adapter = %identity,
                has_parameters = parameters.is_some(),
                "initializing adapter"
            );

            match runtime.plugin().initialize(parameters).await {
                Ok(()) => {
                    runtime.set_state(AdapterRuntimeState::Initialized);
                    index.insert(identity.clone(), runtime.key());
                    info!(adapter = %identity, "adapter initialized");
                }
                Err(err) => {
                    runtime.set_state(AdapterRuntimeState::InitializationFailed);
                    error!(adapter = %identity, error = %err, "failed to initialize adapter");
                    if policy == InitializationPolicy::Strict {
                        shutdown_all(&runtimes).await;
                        return Err(AdapterRegistryError::InitializationFailed {
                            identity: identity.clone(),
                            source: err,
                        });
                    }
                }
            }
        }

        info!(
            adapters = runtimes.len(),
            initialized = index.len(),
            "adapter registry built"
        );
        Ok(Self { runtimes, index })
    }

    /// Resolves an adapter identity to its runtime key.
    ///
    /// Only adapters that initialized successfully are resolvable. The
    /// comparison is exact.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::AdapterNotFound`] when no initialized
    /// adapter has the identity.
    pub fn resolve(&self, identity: &str) -> AdapterRegistryResult<RuntimeKey> {
        self.index.get(identity).copied().ok_or_else(|| {
            warn!(adapter = identity, "adapter is not present in the registry");
            AdapterRegistryError::AdapterNotFound(identity.to_owned())
        })
    }

    /// Returns the runtime for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::RuntimeNotFound`] when the key does not
    /// belong to this registry.
    pub fn runtime(&self, key: RuntimeKey) -> AdapterRegistryResult<&AdapterRuntime> {
        self.runtimes
            .get(key.index())
            .ok_or(AdapterRegistryError::RuntimeNotFound(key))
    }

    /// Asks the adapter owning `key` to create an interface.
    ///
    /// The returned handle is not registered; the caller records it with
    /// [`register_binding`](Self::register_binding).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::RuntimeNotFound`] for an unknown key,
    /// [`AdapterRegistryError::NotInitialized`] when the adapter is not
    /// accepting requests, and [`AdapterRegistryError::Adapter`] when the
    /// adapter fails.
    pub async fn create_interface(
        &self,
        key: RuntimeKey,
        context: &AdapterContext,
        announcement: &DiscoveryAnnouncement,
    ) -> AdapterRegistryResult<InterfaceHandle> {
        let runtime = self.initialized_runtime(key)?;
        runtime
            .plugin()
            .create_interface(context, announcement)
            .await
            .map_err(|err| {
                error!(
                    adapter = %runtime.identity(),
                    device_index = context.device_index(),
                    error = %err,
                    "adapter failed to create interface"
                );
                AdapterRegistryError::Adapter {
                    identity: runtime.identity().clone(),
                    source: err,
                }
            })
    }

    /// Records a binding in the binding set of the runtime that created it.
    ///
    /// Returns the binding carrying its membership token.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::RuntimeNotFound`] for an unknown
    /// runtime and [`AdapterRegistryError::BindingSet`] when the set is
    /// unusable.
    pub fn register_binding(
        &self,
        mut binding: InterfaceBinding,
    ) -> AdapterRegistryResult<InterfaceBinding> {
        let runtime = self.runtime(binding.runtime())?;
        let token = runtime.bindings().add(binding.clone())?;
        binding.assign_membership(token);
        debug!(
            adapter = %runtime.identity(),
            interface_id = binding.interface_id(),
            token = token.sequence(),
            "interface binding registered"
        );
        Ok(binding)
    }

    /// Removes a binding from its set and asks the adapter to release the
    /// interface.
    ///
    /// Releasing a binding that has already been removed, by an earlier
    /// release or by teardown, does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::UnregisteredBinding`] for a binding
    /// that was never registered, [`AdapterRegistryError::RuntimeNotFound`]
    /// for an unknown runtime, and [`AdapterRegistryError::Adapter`] when the
    /// adapter fails to release the interface.
    pub async fn release_interface(&self, binding: &InterfaceBinding) -> AdapterRegistryResult<()> {
        let token = binding
            .membership()
            .ok_or_else(|| AdapterRegistryError::UnregisteredBinding(binding.handle().id()))?;
        let runtime = self.runtime(binding.runtime())?;

        if runtime.bindings().remove(token)?.is_none() {
            debug!(
                adapter = %runtime.identity(),
                interface_id = binding.interface_id(),
                "interface binding already released"
            );
            return Ok(());
        }

        runtime
            .plugin()
            .release_interface(binding.handle())
            .await
            .map_err(|err| {
                error!(
                    adapter = %runtime.identity(),
                    interface_id = binding.interface_id(),
                    error = %err,
                    "adapter failed to release interface"
                );
                AdapterRegistryError::Adapter {
                    identity: runtime.identity().clone(),
                    source: err,
                }
            })
    }

    /// Hands a created but unregistered handle back to its adapter.
    ///
    /// Used when an interface was created and its binding could not be
    /// recorded. The binding set is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::RuntimeNotFound`] for an unknown
    /// runtime and [`AdapterRegistryError::Adapter`] when the adapter fails
    /// to release the handle.
    pub async fn discard_interface(
        &self,
        key: RuntimeKey,
        handle: &InterfaceHandle,
    ) -> AdapterRegistryResult<()> {
        let runtime = self.runtime(key)?;
        runtime
            .plugin()
            .release_interface(handle)
            .await
            .map_err(|err| {
                error!(
                    adapter = %runtime.identity(),
                    interface_id = handle.interface_id(),
                    error = %err,
                    "adapter failed to discard interface"
                );
                AdapterRegistryError::Adapter {
                    identity: runtime.identity().clone(),
                    source: err,
                }
            })
    }

    /// Returns every bound interface handle across all adapters.
    ///
    /// Each runtime's binding set is snapshotted under its own lock in turn;
    /// no lock spans runtimes.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::BindingSet`] when a set is unusable.
    pub fn collect_all_interfaces(&self) -> AdapterRegistryResult<Vec<InterfaceHandle>> {
        let mut handles = Vec::new();
        for runtime in &self.runtimes {
            handles.extend(
                runtime
                    .bindings()
                    .snapshot()?
                    .into_iter()
                    .map(|binding| binding.handle().clone()),
            );
        }
        Ok(handles)
    }

    /// Returns whether any bound interface advertises `interface_id`,
    /// ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::BindingSet`] when a set is unusable.
    pub fn is_interface_id_published(&self, interface_id: &str) -> AdapterRegistryResult<bool> {
        for runtime in &self.runtimes {
            let published = runtime
                .bindings()
                .snapshot()?
                .iter()
                .any(|binding| binding.interface_id().eq_ignore_ascii_case(interface_id));
            if published {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Shuts down every initialized adapter, then discards all bindings.
    ///
    /// Each adapter's `shutdown` runs at most once across any number of
    /// calls; adapters that never initialized are skipped.
    pub async fn teardown(&self) -> TeardownReport {
        let adapters_shut_down = shutdown_all(&self.runtimes).await;

        let mut bindings_swept = 0;
        for runtime in &self.runtimes {
            match runtime.bindings().clear() {
                Ok(swept) => bindings_swept += swept.len(),
                Err(err) => {
                    warn!(adapter = %runtime.identity(), error = %err, "failed to sweep bindings");
                }
            }
        }

        info!(adapters_shut_down, bindings_swept, "adapter registry torn down");
        TeardownReport {
            adapters_shut_down,
            bindings_swept,
        }
    }

    /// Returns all runtimes in manifest order, including unusable ones.
    #[must_use]
    pub fn runtimes(&self) -> &[AdapterRuntime] {
        &self.runtimes
    }

    /// Iterates the identities that resolve to a runtime.
    pub fn identities(&self) -> impl Iterator<Item = &AdapterIdentity> {
        self.index.keys()
    }

    /// Returns the number of runtimes, including unusable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runtimes.len()
    }

    /// Returns whether the manifest was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    /// Returns the number of bindings across all runtimes.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::BindingSet`] when a set is unusable.
    pub fn binding_count(&self) -> AdapterRegistryResult<usize> {
        let mut count = 0;
        for runtime in &self.runtimes {
            count += runtime.bindings().len()?;
        }
        Ok(count)
    }

    fn initialized_runtime(&self, key: RuntimeKey) -> AdapterRegistryResult<&AdapterRuntime> {
        let runtime = self.runtime(key)?;
        let state = runtime.state();
        if state != AdapterRuntimeState::Initialized {
            return Err(AdapterRegistryError::NotInitialized {
                identity: runtime.identity().clone(),
                state,
            });
        }
        Ok(runtime)
    }
}

impl Drop for AdapterRegistry {
    fn drop(&mut self) {
        for runtime in &self.runtimes {
            if runtime.is_initialized() {
                warn!(
                    adapter = %runtime.identity(),
                    "adapter registry dropped without teardown"
                );
            }
        }
    }
}

fn validate_manifest(manifest: AdapterManifest) -> AdapterRegistryResult<Vec<AdapterRuntime>> {
    let mut seen = HashSet::with_capacity(manifest.len());

    manifest
        .into_iter()
        .enumerate()
        .map(|(position, descriptor)| {
            let (raw_identity, plugin) = descriptor.into_parts();
            let identity = AdapterIdentity::new(raw_identity).map_err(|err| {
                error!(position, error = %err, "adapter descriptor has no identity");
                AdapterRegistryError::InvalidAdapter {
                    position,
                    source: err,
                }
            })?;
            if !seen.insert(identity.clone()) {
                error!(position, adapter = %identity, "found duplicate adapter identity");
                return Err(AdapterRegistryError::DuplicateIdentity { position, identity });
            }
            Ok(AdapterRuntime::new(RuntimeKey::new(position), identity, plugin))
        })
        .collect()
}

async fn shutdown_all(runtimes: &[AdapterRuntime]) -> usize {
    let mut shut_down = 0;
    for runtime in runtimes {
        if runtime.begin_shutdown() {
            runtime.plugin().shutdown().await;
            shut_down += 1;
            info!(adapter = %runtime.identity(), "adapter shut down");
        }
    }
    shut_down
}
