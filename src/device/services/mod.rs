//! Application services for device matching.

mod matcher;

pub use matcher::{DeviceMatchEngine, MatchedDevice};
