//! In-memory adapter plugin for tests and local runs.

use crate::adapter::{
    domain::{InterfaceHandle, InterfaceHandleId},
    ports::{AdapterContext, AdapterPlugin, AdapterPluginError, AdapterPluginResult},
};
use crate::config::ParameterBlock;
use crate::device::domain::DiscoveryAnnouncement;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Deterministic adapter plugin that keeps its interfaces in memory.
///
/// Clones share state, so a test can hand one clone to the manifest and
/// inspect the other. Each created interface advertises the interface id
/// resolved for the device. Failures can be injected per operation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapter {
    state: Arc<RwLock<InMemoryAdapterState>>,
}

#[derive(Debug, Default)]
struct InMemoryAdapterState {
    initialized: bool,
    parameters: Option<ParameterBlock>,
    interfaces: HashMap<InterfaceHandleId, String>,
    initialize_calls: usize,
    create_calls: usize,
    release_calls: usize,
    shutdown_calls: usize,
    initialize_failure: Option<String>,
    create_failure: Option<String>,
    release_failure: Option<String>,
}

impl InMemoryAdapter {
    /// Creates an adapter with no injected failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `initialize` call fail with `reason`.
    #[must_use]
    pub fn failing_initialize(self, reason: impl Into<String>) -> Self {
        self.update(|state| state.initialize_failure = Some(reason.into()));
        self
    }

    /// Makes every `create_interface` call fail with `reason`.
    #[must_use]
    pub fn failing_create(self, reason: impl Into<String>) -> Self {
        self.update(|state| state.create_failure = Some(reason.into()));
        self
    }

    /// Makes every `release_interface` call fail with `reason`.
    #[must_use]
    pub fn failing_release(self, reason: impl Into<String>) -> Self {
        self.update(|state| state.release_failure = Some(reason.into()));
        self
    }

    /// Returns whether `initialize` succeeded and `shutdown` has not run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read().is_ok_and(|state| state.initialized)
    }

    /// Returns the parameter block received by `initialize`.
    #[must_use]
    pub fn parameters(&self) -> Option<ParameterBlock> {
        self.read().ok().and_then(|state| state.parameters.clone())
    }

    /// Returns the interface ids of the interfaces currently alive, sorted.
    #[must_use]
    pub fn live_interface_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read()
            .map(|state| state.interfaces.values().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Returns how often `initialize` was called.
    #[must_use]
    pub fn initialize_calls(&self) -> usize {
        self.read().map_or(0, |state| state.initialize_calls)
    }

    /// Returns how often `create_interface` was called.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.read().map_or(0, |state| state.create_calls)
    }

    /// Returns how often `release_interface` was called.
    #[must_use]
    pub fn release_calls(&self) -> usize {
        self.read().map_or(0, |state| state.release_calls)
    }

    /// Returns how often `shutdown` was called.
    #[must_use]
    pub fn shutdown_calls(&self) -> usize {
        self.read().map_or(0, |state| state.shutdown_calls)
    }

    fn update(&self, apply: impl FnOnce(&mut InMemoryAdapterState)) {
        if let Ok(mut state) = self.write() {
            apply(&mut state);
        }
    }

    fn read(&self) -> AdapterPluginResult<RwLockReadGuard<'_, InMemoryAdapterState>> {
        self.state
            .read()
            .map_err(|err| AdapterPluginError::runtime(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> AdapterPluginResult<RwLockWriteGuard<'_, InMemoryAdapterState>> {
        self.state
            .write()
            .map_err(|err| AdapterPluginError::runtime(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl AdapterPlugin for InMemoryAdapter {
    async fn initialize(&self, parameters: Option<ParameterBlock>) -> AdapterPluginResult<()> {
        let mut state = self.write()?;
        state.initialize_calls += 1;
        if let Some(reason) = &state.initialize_failure {
            return Err(AdapterPluginError::InvalidArguments(reason.clone()));
        }
        state.initialized = true;
        state.parameters = parameters;
        Ok(())
    }

    async fn create_interface(
        &self,
        context: &AdapterContext,
        announcement: &DiscoveryAnnouncement,
    ) -> AdapterPluginResult<InterfaceHandle> {
        let mut state = self.write()?;
        state.create_calls += 1;
        if !state.initialized {
            return Err(AdapterPluginError::InvalidArguments(format!(
                "adapter '{}' is not initialized",
                context.identity()
            )));
        }
        if let Some(reason) = &state.create_failure {
            return Err(AdapterPluginError::InsufficientResources(reason.clone()));
        }

        let interface_id = context.resolve_interface_id(announcement).ok_or_else(|| {
            AdapterPluginError::Unsupported(format!(
                "device {} has no interface id",
                context.device_index()
            ))
        })?;
        let handle = InterfaceHandle::new(interface_id);
        state
            .interfaces
            .insert(handle.id(), handle.interface_id().to_owned());
        Ok(handle)
    }

    async fn release_interface(&self, handle: &InterfaceHandle) -> AdapterPluginResult<()> {
        let mut state = self.write()?;
        state.release_calls += 1;
        if let Some(reason) = &state.release_failure {
            return Err(AdapterPluginError::runtime(std::io::Error::other(
                reason.clone(),
            )));
        }
        if state.interfaces.remove(&handle.id()).is_none() {
            return Err(AdapterPluginError::InvalidArguments(format!(
                "interface {} is not owned by this adapter",
                handle.id()
            )));
        }
        Ok(())
    }

    async fn shutdown(&self) {
        if let Ok(mut state) = self.write() {
            state.shutdown_calls += 1;
            state.initialized = false;
            state.interfaces.clear();
        }
    }
}
