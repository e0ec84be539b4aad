//! Capability-based loading of configuration files.

use super::{BridgeConfiguration, ConfigurationError, ConfigurationResult};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::{debug, error};

/// Reads and parses a configuration document from `path`.
///
/// The parent directory is opened as a capability and the file is read
/// relative to it. A bare file name is resolved against the current
/// directory.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidPath`] when `path` has no file name,
/// [`ConfigurationError::Read`] when the file cannot be read, and
/// [`ConfigurationError::Parse`] when its contents are malformed.
pub fn load_from_path(path: &Utf8Path) -> ConfigurationResult<BridgeConfiguration> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigurationError::InvalidPath(path.to_path_buf()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let text = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name))
        .map_err(|err| {
            error!(path = %path, error = %err, "failed to read bridge configuration");
            ConfigurationError::read(path, err)
        })?;

    debug!(path = %path, bytes = text.len(), "read bridge configuration");
    BridgeConfiguration::from_json_str(&text)
}
