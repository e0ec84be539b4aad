//! Twin bridge: device-to-interface binding for an edge bridge.
//!
//! Devices are announced by discovery sources or declared statically in
//! configuration. Each one is handed to a pluggable adapter that exposes it
//! as an interface to an upstream digital-twin service. This crate owns the
//! adapter registry and its lifecycle, the matching of announcements to
//! configured devices, and the bookkeeping of every interface created.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`config`]: Configuration document, loading, and validation
//! - [`device`]: Configured devices and announcement matching
//! - [`adapter`]: Adapter plugins, registry, and interface bindings
//! - [`bridge`]: Binding orchestration between the two
//! - [`error`]: Crate-wide error classification

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod device;
pub mod error;
