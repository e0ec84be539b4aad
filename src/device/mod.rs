//! Device catalog and announcement matching.
//!
//! Discovery sources report device sightings as announcements. This module
//! decides which single statically configured device entry an announcement
//! belongs to:
//!
//! - Domain types in [`domain`]
//! - The match engine in [`services`]

pub mod domain;
pub mod services;
