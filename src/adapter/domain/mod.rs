//! Domain model for adapter runtimes and the interfaces they create.
//!
//! Adapters are identified by a validated identity, runtimes by their
//! position in the registry, and every created interface is tracked as a
//! binding inside its runtime's concurrent binding set.

mod binding;
mod binding_set;
mod error;
mod handle;
mod ids;

pub use binding::InterfaceBinding;
pub use binding_set::InterfaceBindingSet;
pub use error::{AdapterDomainError, BindingSetError, BindingSetResult};
pub use handle::InterfaceHandle;
pub use ids::{AdapterIdentity, InterfaceHandleId, MembershipToken, RuntimeKey};
