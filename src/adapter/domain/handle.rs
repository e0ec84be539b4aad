//! Interface handles produced by adapters.

use super::InterfaceHandleId;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An interface instance created by an adapter for one device.
///
/// The handle advertises the interface id published upstream and may carry
/// opaque adapter state. Clones share the same state and identifier.
#[derive(Clone)]
pub struct InterfaceHandle {
    id: InterfaceHandleId,
    interface_id: String,
    state: Option<Arc<dyn Any + Send + Sync>>,
}

impl InterfaceHandle {
    /// Creates a handle advertising `interface_id`.
    #[must_use]
    pub fn new(interface_id: impl Into<String>) -> Self {
        Self {
            id: InterfaceHandleId::new(),
            interface_id: interface_id.into(),
            state: None,
        }
    }

    /// Attaches opaque adapter state to the handle.
    #[must_use]
    pub fn with_state<T>(mut self, state: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.state = Some(Arc::new(state));
        self
    }

    /// Returns the handle identifier.
    #[must_use]
    pub const fn id(&self) -> InterfaceHandleId {
        self.id
    }

    /// Returns the advertised interface id.
    #[must_use]
    pub fn interface_id(&self) -> &str {
        &self.interface_id
    }

    /// Returns the adapter state when it has type `T`.
    #[must_use]
    pub fn state<T: Any>(&self) -> Option<&T> {
        self.state
            .as_deref()
            .and_then(|state| state.downcast_ref::<T>())
    }
}

impl fmt::Debug for InterfaceHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("InterfaceHandle")
            .field("id", &self.id)
            .field("interface_id", &self.interface_id)
            .field("has_state", &self.state.is_some())
            .finish()
    }
}

impl PartialEq for InterfaceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InterfaceHandle {}
