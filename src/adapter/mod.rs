//! Adapter registration, lifecycle, and interface bookkeeping.
//!
//! An adapter translates one family of devices into upstream interfaces.
//! The registry loads a fixed manifest of adapters at startup, initializes
//! them, and tracks every interface they create until teardown. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The plugin contract in [`ports`]
//! - Plugin implementations in [`adapters`]
//! - Registry and lifecycle services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
