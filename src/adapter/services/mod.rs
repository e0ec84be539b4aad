//! Application services for adapter registration and lifecycle.

mod manifest;
mod registry;
mod runtime;

pub use manifest::{AdapterDescriptor, AdapterManifest};
pub use registry::{
    AdapterRegistry, AdapterRegistryError, AdapterRegistryResult, InitializationPolicy,
    TeardownReport,
};
pub use runtime::{AdapterRuntime, AdapterRuntimeState};
