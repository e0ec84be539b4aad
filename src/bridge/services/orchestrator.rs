//! Binding of discovery announcements to adapter-created interfaces.

use crate::adapter::{
    domain::InterfaceBinding,
    ports::AdapterContext,
    services::{AdapterRegistry, AdapterRegistryError},
};
use crate::device::{
    domain::{DiscoveryAnnouncement, MatchError},
    services::DeviceMatchEngine,
};
use crate::error::ErrorKind;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Service-level errors for binding operations.
#[derive(Debug, Clone, Error)]
pub enum BindingError {
    /// The announcement did not resolve to exactly one device.
    #[error(transparent)]
    Match(#[from] MatchError),
    /// The registry or the adapter rejected the request.
    #[error(transparent)]
    Registry(#[from] AdapterRegistryError),
}

impl BindingError {
    /// Returns the crate-wide classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Match(err) => err.kind(),
            Self::Registry(err) => err.kind(),
        }
    }
}

/// Result type for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;

/// Counters returned when an announcement stream closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingSummary {
    /// Announcements that produced a binding.
    pub bound: usize,
    /// Announcements that failed to bind.
    pub failed: usize,
}

/// Joins the device match engine and the adapter registry.
///
/// An announcement is matched to its configured device, the owning adapter
/// is resolved, and the interface the adapter creates is recorded in that
/// adapter's binding set.
pub struct BindingOrchestrator<C>
where
    C: Clock + Send + Sync,
{
    registry: Arc<AdapterRegistry>,
    matcher: DeviceMatchEngine,
    clock: Arc<C>,
}

impl<C> BindingOrchestrator<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub const fn new(
        registry: Arc<AdapterRegistry>,
        matcher: DeviceMatchEngine,
        clock: Arc<C>,
    ) -> Self {
        Self {
            registry,
            matcher,
            clock,
        }
    }

    /// Returns the adapter registry.
    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Returns the device match engine.
    #[must_use]
    pub const fn matcher(&self) -> &DeviceMatchEngine {
        &self.matcher
    }

    /// Binds one announcement to an interface.
    ///
    /// A successful non-wildcard match writes the device's interface id onto
    /// the announcement before the adapter is called.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Match`] when the announcement matches no
    /// device or is ambiguous, and [`BindingError::Registry`] when the owning
    /// adapter is unavailable or fails. Nothing is registered on error; a
    /// handle whose binding cannot be recorded is released first.
    pub async fn bind(
        &self,
        announcement: &mut DiscoveryAnnouncement,
    ) -> BindingResult<InterfaceBinding> {
        let matched = self.matcher.resolve(announcement)?;
        let key = self.registry.resolve(matched.adapter_identity())?;
        let identity = self.registry.runtime(key)?.identity().clone();
        let context = AdapterContext::new(key, identity, matched.index(), matched.entry().clone());

        let handle = self
            .registry
            .create_interface(key, &context, announcement)
            .await?;
        let binding = match self
            .registry
            .register_binding(InterfaceBinding::new(handle.clone(), key, &*self.clock))
        {
            Ok(binding) => binding,
            Err(err) => {
                if let Err(release_err) = self.registry.discard_interface(key, &handle).await {
                    warn!(
                        adapter = %context.identity(),
                        interface_id = handle.interface_id(),
                        error = %release_err,
                        "could not release interface after failed registration"
                    );
                }
                return Err(err.into());
            }
        };

        info!(
            adapter = %context.identity(),
            device_index = context.device_index(),
            interface_id = binding.interface_id(),
            "device bound to interface"
        );
        Ok(binding)
    }

    /// Releases a binding created by [`bind`](Self::bind).
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Registry`] when the binding is unknown or the
    /// adapter fails to release it.
    pub async fn unbind(&self, binding: &InterfaceBinding) -> BindingResult<()> {
        self.registry.release_interface(binding).await?;
        debug!(interface_id = binding.interface_id(), "device unbound");
        Ok(())
    }

    /// Binds every announcement received until the channel closes.
    ///
    /// Failures are logged and counted; they do not stop the loop.
    pub async fn run(
        &self,
        mut announcements: mpsc::Receiver<DiscoveryAnnouncement>,
    ) -> BindingSummary {
        let mut summary = BindingSummary::default();

        while let Some(mut announcement) = announcements.recv().await {
            match self.bind(&mut announcement).await {
                Ok(_) => summary.bound += 1,
                Err(err) => {
                    summary.failed += 1;
                    warn!(
                        source = announcement.source(),
                        kind = %err.kind(),
                        error = %err,
                        "failed to bind announcement"
                    );
                }
            }
        }

        info!(
            bound = summary.bound,
            failed = summary.failed,
            "announcement stream closed"
        );
        summary
    }
}
