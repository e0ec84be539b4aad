//! Step definitions for device binding scenarios.

mod given;
mod then;
mod when;
pub mod world;
