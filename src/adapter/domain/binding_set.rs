//! Concurrent collection of the bindings owned by one adapter runtime.

use super::{BindingSetError, BindingSetResult, InterfaceBinding, MembershipToken};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe, insertion-ordered set of interface bindings.
///
/// Locking is internal: callers only ever see [`add`](Self::add),
/// [`remove`](Self::remove), and [`snapshot`](Self::snapshot). Every
/// operation holds the lock only for its own bookkeeping.
#[derive(Debug, Default)]
pub struct InterfaceBindingSet {
    state: RwLock<BindingSetState>,
}

#[derive(Debug, Default)]
struct BindingSetState {
    next_sequence: u64,
    entries: BTreeMap<MembershipToken, InterfaceBinding>,
}

impl InterfaceBindingSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding and returns its membership token.
    ///
    /// The stored binding carries the issued token; tokens increase
    /// monotonically so iteration order is insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn add(&self, mut binding: InterfaceBinding) -> BindingSetResult<MembershipToken> {
        let mut state = self.write()?;
        let token = MembershipToken::new(state.next_sequence);
        state.next_sequence = state.next_sequence.wrapping_add(1);
        binding.assign_membership(token);
        state.entries.insert(token, binding);
        Ok(token)
    }

    /// Removes the binding registered under `token`.
    ///
    /// Returns `None`, changing nothing, when the token has already been
    /// removed or was never issued by this set.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn remove(&self, token: MembershipToken) -> BindingSetResult<Option<InterfaceBinding>> {
        Ok(self.write()?.entries.remove(&token))
    }

    /// Returns a point-in-time copy of all bindings in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn snapshot(&self) -> BindingSetResult<Vec<InterfaceBinding>> {
        Ok(self.read()?.entries.values().cloned().collect())
    }

    /// Returns the number of registered bindings.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn len(&self) -> BindingSetResult<usize> {
        Ok(self.read()?.entries.len())
    }

    /// Returns whether the set holds no bindings.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn is_empty(&self) -> BindingSetResult<bool> {
        Ok(self.read()?.entries.is_empty())
    }

    /// Removes every binding and returns them in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BindingSetError::Poisoned`] when the lock is poisoned.
    pub fn clear(&self) -> BindingSetResult<Vec<InterfaceBinding>> {
        let drained = std::mem::take(&mut self.write()?.entries);
        Ok(drained.into_values().collect())
    }

    fn read(&self) -> BindingSetResult<RwLockReadGuard<'_, BindingSetState>> {
        self.state
            .read()
            .map_err(|err| BindingSetError::Poisoned(err.to_string()))
    }

    fn write(&self) -> BindingSetResult<RwLockWriteGuard<'_, BindingSetState>> {
        self.state
            .write()
            .map_err(|err| BindingSetError::Poisoned(err.to_string()))
    }
}
