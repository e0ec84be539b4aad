//! Resolution of discovery announcements to configured devices.

use crate::device::domain::{
    DeviceCatalog, DeviceConfigEntry, DiscoveryAnnouncement, MatchError, MatchFilter, MatchResult,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// A configured device selected for an announcement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedDevice<'a> {
    index: usize,
    entry: &'a DeviceConfigEntry,
    identity: &'a str,
}

impl<'a> MatchedDevice<'a> {
    /// Returns the position of the entry in the catalog.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the matched entry.
    #[must_use]
    pub const fn entry(&self) -> &'a DeviceConfigEntry {
        self.entry
    }

    /// Returns the identity of the adapter owning the entry.
    #[must_use]
    pub const fn adapter_identity(&self) -> &'a str {
        self.identity
    }
}

/// Finds the single configured device an announcement belongs to.
///
/// The catalog is scanned once in configuration order:
///
/// - a wildcard entry (`"*"`) matches every announcement;
/// - a discriminator entry matches when every expected parameter is present
///   in the announcement and the observed value contains the expected value;
/// - a second match owned by the same adapter identity (ignoring ASCII case)
///   is [`MatchError::Ambiguous`], while a second match owned by a different
///   adapter is ignored and the first match is kept.
///
/// Scanning continues after the first match so later conflicts are caught.
#[derive(Debug, Clone)]
pub struct DeviceMatchEngine {
    catalog: Arc<DeviceCatalog>,
}

impl DeviceMatchEngine {
    /// Creates a match engine over a device catalog.
    #[must_use]
    pub const fn new(catalog: Arc<DeviceCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the catalog being matched against.
    #[must_use]
    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// Resolves an announcement to its configured device.
    ///
    /// On a non-wildcard match the entry's interface id is written onto the
    /// announcement once the whole catalog has been scanned. A failed
    /// resolution leaves the announcement untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NoMatch`] when no entry matches and
    /// [`MatchError::Ambiguous`] when two entries of the same adapter match.
    pub fn resolve(
        &self,
        announcement: &mut DiscoveryAnnouncement,
    ) -> MatchResult<MatchedDevice<'_>> {
        let mut recorded: Option<MatchedDevice<'_>> = None;

        for (index, entry) in self.catalog.iter() {
            let Some(identity) = entry.adapter_identity() else {
                warn!(device_index = index, "skipping device without adapter identity");
                continue;
            };
            let Some(filter) = entry.match_filter() else {
                debug!(device_index = index, "skipping device without match filters");
                continue;
            };
            if !accepts(filter, announcement) {
                continue;
            }

            if let Some(prior) = recorded {
                if prior.identity.eq_ignore_ascii_case(identity) {
                    warn!(
                        adapter = identity,
                        first = prior.index,
                        second = index,
                        "multiple configured devices match the announcement"
                    );
                    return Err(MatchError::Ambiguous {
                        identity: identity.to_owned(),
                        first: prior.index,
                        second: index,
                    });
                }
                debug!(
                    adapter = identity,
                    device_index = index,
                    kept = prior.index,
                    "ignoring match owned by a different adapter"
                );
                continue;
            }

            recorded = Some(MatchedDevice {
                index,
                entry,
                identity,
            });
        }

        let matched = recorded.ok_or(MatchError::NoMatch)?;
        if let Some(filter) = matched.entry.match_filter()
            && !filter.is_wildcard()
            && let Some(interface_id) = matched.entry.interface_id()
        {
            announcement.assign_interface_id(interface_id);
        }
        Ok(matched)
    }
}

fn accepts(filter: &MatchFilter, announcement: &DiscoveryAnnouncement) -> bool {
    if filter.is_wildcard() {
        return true;
    }
    if filter.parameter_count() == 0 {
        return false;
    }

    filter
        .expected_parameters()
        .all(|(name, expected)| match (expected, announcement.discriminator(name)) {
            (Some(expected_value), Some(observed)) => observed.contains(expected_value),
            _ => false,
        })
}
