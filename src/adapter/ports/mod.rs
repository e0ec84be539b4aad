//! Port contracts for adapter plugins.

mod plugin;

pub use plugin::{AdapterContext, AdapterPlugin, AdapterPluginError, AdapterPluginResult};
