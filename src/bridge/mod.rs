//! Use cases joining device matching with the adapter registry.

pub mod services;
