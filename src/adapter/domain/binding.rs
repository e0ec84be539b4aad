//! Live bindings between devices and adapter-created interfaces.

use super::{InterfaceHandle, MembershipToken, RuntimeKey};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// One created device interface, owned by its runtime's binding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBinding {
    handle: InterfaceHandle,
    runtime: RuntimeKey,
    membership: Option<MembershipToken>,
    bound_at: DateTime<Utc>,
}

impl InterfaceBinding {
    /// Creates an unregistered binding for a handle created by `runtime`.
    #[must_use]
    pub fn new(handle: InterfaceHandle, runtime: RuntimeKey, clock: &impl Clock) -> Self {
        Self {
            handle,
            runtime,
            membership: None,
            bound_at: clock.utc(),
        }
    }

    /// Returns the interface handle.
    #[must_use]
    pub const fn handle(&self) -> &InterfaceHandle {
        &self.handle
    }

    /// Returns the advertised interface id.
    #[must_use]
    pub fn interface_id(&self) -> &str {
        self.handle.interface_id()
    }

    /// Returns the key of the runtime that created the interface.
    #[must_use]
    pub const fn runtime(&self) -> RuntimeKey {
        self.runtime
    }

    /// Returns the membership token once the binding has been registered.
    #[must_use]
    pub const fn membership(&self) -> Option<MembershipToken> {
        self.membership
    }

    /// Returns when the binding was created.
    #[must_use]
    pub const fn bound_at(&self) -> DateTime<Utc> {
        self.bound_at
    }

    pub(crate) const fn assign_membership(&mut self, token: MembershipToken) {
        self.membership = Some(token);
    }
}
