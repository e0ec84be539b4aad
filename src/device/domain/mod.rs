//! Domain model for configured devices and discovery announcements.

mod announcement;
mod catalog;
mod entry;
mod error;

pub use announcement::DiscoveryAnnouncement;
pub use catalog::DeviceCatalog;
pub use entry::{DeviceConfigEntry, MatchFilter, WILDCARD_MATCH_TYPE};
pub use error::{MatchError, MatchResult};
