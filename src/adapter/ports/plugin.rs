//! Plugin port implemented by every device adapter.

use crate::adapter::domain::{AdapterIdentity, InterfaceHandle, RuntimeKey};
use crate::config::ParameterBlock;
use crate::device::domain::{DeviceConfigEntry, DiscoveryAnnouncement};
use crate::error::ErrorKind;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for adapter plugin operations.
pub type AdapterPluginResult<T> = Result<T, AdapterPluginError>;

/// Device-to-interface translation contract for one device family.
///
/// The registry calls these operations outside any of its own locks;
/// implementations synchronize their internal state themselves.
#[async_trait]
pub trait AdapterPlugin: Send + Sync {
    /// Prepares the adapter with the parameter block configured for its
    /// identity, or `None` when no block is configured.
    async fn initialize(&self, parameters: Option<ParameterBlock>) -> AdapterPluginResult<()>;

    /// Creates an interface for the device described by `context`.
    async fn create_interface(
        &self,
        context: &AdapterContext,
        announcement: &DiscoveryAnnouncement,
    ) -> AdapterPluginResult<InterfaceHandle>;

    /// Releases an interface previously returned by
    /// [`create_interface`](Self::create_interface).
    async fn release_interface(&self, handle: &InterfaceHandle) -> AdapterPluginResult<()>;

    /// Stops the adapter. Called at most once, after a successful
    /// initialization.
    async fn shutdown(&self);
}

/// Information handed to an adapter when it creates an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterContext {
    runtime: RuntimeKey,
    identity: AdapterIdentity,
    device_index: usize,
    device: DeviceConfigEntry,
}

impl AdapterContext {
    /// Creates a context for the configured device at `device_index`.
    #[must_use]
    pub const fn new(
        runtime: RuntimeKey,
        identity: AdapterIdentity,
        device_index: usize,
        device: DeviceConfigEntry,
    ) -> Self {
        Self {
            runtime,
            identity,
            device_index,
            device,
        }
    }

    /// Returns the key of the runtime the adapter is running in.
    #[must_use]
    pub const fn runtime(&self) -> RuntimeKey {
        self.runtime
    }

    /// Returns the adapter identity.
    #[must_use]
    pub const fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    /// Returns the position of the device in the configured catalog.
    #[must_use]
    pub const fn device_index(&self) -> usize {
        self.device_index
    }

    /// Returns the matched device configuration.
    #[must_use]
    pub const fn device(&self) -> &DeviceConfigEntry {
        &self.device
    }

    /// Returns the interface id to publish: the one resolved onto the
    /// announcement, falling back to the one declared on the device.
    #[must_use]
    pub fn resolve_interface_id<'a>(
        &'a self,
        announcement: &'a DiscoveryAnnouncement,
    ) -> Option<&'a str> {
        announcement
            .interface_id()
            .or_else(|| self.device.interface_id())
    }
}

/// Errors reported by adapter plugins.
#[derive(Debug, Clone, Error)]
pub enum AdapterPluginError {
    /// The adapter rejected its input.
    #[error("invalid adapter arguments: {0}")]
    InvalidArguments(String),

    /// The adapter cannot serve the announced device.
    #[error("device not supported by adapter: {0}")]
    Unsupported(String),

    /// The adapter ran out of a resource it needs.
    #[error("adapter resources exhausted: {0}")]
    InsufficientResources(String),

    /// Generic adapter failure.
    #[error("adapter runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdapterPluginError {
    /// Wraps a runtime error from the adapter implementation.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArguments(_) => ErrorKind::InvalidArguments,
            Self::InsufficientResources(_) => ErrorKind::InsufficientResources,
            Self::Unsupported(_) | Self::Runtime(_) => ErrorKind::AdapterFailure,
        }
    }
}
