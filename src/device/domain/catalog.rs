//! Ordered catalog of configured devices.

use super::DeviceConfigEntry;

/// The configured devices, in configuration order.
///
/// Positions in the catalog are the device indices used in diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceCatalog {
    entries: Vec<DeviceConfigEntry>,
}

impl DeviceCatalog {
    /// Creates a catalog from entries in configuration order.
    #[must_use]
    pub const fn new(entries: Vec<DeviceConfigEntry>) -> Self {
        Self { entries }
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DeviceConfigEntry> {
        self.entries.get(index)
    }

    /// Iterates entries with their device indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &DeviceConfigEntry)> {
        self.entries.iter().enumerate()
    }

    /// Returns the number of configured devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no devices are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<DeviceConfigEntry> for DeviceCatalog {
    fn from_iter<I: IntoIterator<Item = DeviceConfigEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
