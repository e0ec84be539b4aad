//! Adapter manifest assembled by the embedding process.

use crate::adapter::ports::AdapterPlugin;
use std::fmt;
use std::sync::Arc;

/// One manifest entry: an adapter identity and its plugin implementation.
#[derive(Clone)]
pub struct AdapterDescriptor {
    identity: String,
    plugin: Arc<dyn AdapterPlugin>,
}

impl AdapterDescriptor {
    /// Creates a descriptor from a shared plugin.
    #[must_use]
    pub fn new(identity: impl Into<String>, plugin: Arc<dyn AdapterPlugin>) -> Self {
        Self {
            identity: identity.into(),
            plugin,
        }
    }

    /// Returns the identity as declared, before validation.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub(crate) fn into_parts(self) -> (String, Arc<dyn AdapterPlugin>) {
        (self.identity, self.plugin)
    }
}

impl fmt::Debug for AdapterDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AdapterDescriptor")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Ordered list of adapter descriptors handed to the registry at startup.
#[derive(Debug, Clone, Default)]
pub struct AdapterManifest {
    descriptors: Vec<AdapterDescriptor>,
}

impl AdapterManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an adapter plugin under `identity`.
    #[must_use]
    pub fn with_adapter<P>(self, identity: impl Into<String>, plugin: P) -> Self
    where
        P: AdapterPlugin + 'static,
    {
        self.with_shared_adapter(identity, Arc::new(plugin))
    }

    /// Appends an already shared adapter plugin under `identity`.
    #[must_use]
    pub fn with_shared_adapter(
        mut self,
        identity: impl Into<String>,
        plugin: Arc<dyn AdapterPlugin>,
    ) -> Self {
        self.descriptors.push(AdapterDescriptor::new(identity, plugin));
        self
    }

    /// Returns the descriptors in manifest order.
    #[must_use]
    pub fn descriptors(&self) -> &[AdapterDescriptor] {
        &self.descriptors
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns whether the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<AdapterDescriptor> for AdapterManifest {
    fn from_iter<I: IntoIterator<Item = AdapterDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AdapterManifest {
    type Item = AdapterDescriptor;
    type IntoIter = std::vec::IntoIter<AdapterDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}
