//! Adapter plugin implementations shipped with the crate.

mod memory;

pub use memory::InMemoryAdapter;
