//! Per-adapter runtime state owned by the registry.

use crate::adapter::{
    domain::{AdapterIdentity, InterfaceBindingSet, RuntimeKey},
    ports::AdapterPlugin,
};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle state of an adapter runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterRuntimeState {
    /// Validated but not yet initialized.
    Registered,
    /// `initialize` succeeded; the adapter accepts interface requests.
    Initialized,
    /// `initialize` failed; the adapter is unusable.
    InitializationFailed,
    /// `shutdown` has been invoked.
    ShutDown,
}

impl AdapterRuntimeState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Initialized => "initialized",
            Self::InitializationFailed => "initialization_failed",
            Self::ShutDown => "shut_down",
        }
    }
}

impl fmt::Display for AdapterRuntimeState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One adapter plugin paired with its binding set and lifecycle state.
pub struct AdapterRuntime {
    key: RuntimeKey,
    identity: AdapterIdentity,
    plugin: Arc<dyn AdapterPlugin>,
    bindings: InterfaceBindingSet,
    state: Mutex<AdapterRuntimeState>,
}

impl AdapterRuntime {
    pub(crate) fn new(
        key: RuntimeKey,
        identity: AdapterIdentity,
        plugin: Arc<dyn AdapterPlugin>,
    ) -> Self {
        Self {
            key,
            identity,
            plugin,
            bindings: InterfaceBindingSet::new(),
            state: Mutex::new(AdapterRuntimeState::Registered),
        }
    }

    /// Returns the runtime key.
    #[must_use]
    pub const fn key(&self) -> RuntimeKey {
        self.key
    }

    /// Returns the adapter identity.
    #[must_use]
    pub const fn identity(&self) -> &AdapterIdentity {
        &self.identity
    }

    /// Returns the bindings created by this adapter.
    #[must_use]
    pub const fn bindings(&self) -> &InterfaceBindingSet {
        &self.bindings
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AdapterRuntimeState {
        *self.lock_state()
    }

    /// Returns whether the adapter initialized and has not been shut down.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state() == AdapterRuntimeState::Initialized
    }

    pub(crate) fn plugin(&self) -> &dyn AdapterPlugin {
        self.plugin.as_ref()
    }

    pub(crate) fn set_state(&self, target: AdapterRuntimeState) {
        *self.lock_state() = target;
    }

    /// Moves an initialized runtime to `ShutDown`.
    ///
    /// Returns `true` only for the caller that performed the transition,
    /// which then owns the single `shutdown` call.
    pub(crate) fn begin_shutdown(&self) -> bool {
        let mut state = self.lock_state();
        if *state != AdapterRuntimeState::Initialized {
            return false;
        }
        *state = AdapterRuntimeState::ShutDown;
        true
    }

    // The guarded value is a plain `Copy` state, so a poisoned lock still
    // holds a valid state.
    fn lock_state(&self) -> MutexGuard<'_, AdapterRuntimeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for AdapterRuntime {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AdapterRuntime")
            .field("key", &self.key)
            .field("identity", &self.identity)
            .field("state", &self.state())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
