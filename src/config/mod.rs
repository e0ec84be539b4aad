//! Bridge configuration document, loading, and validation.
//!
//! The configuration document declares the statically known devices, the
//! parameter block handed to each adapter at initialization, and the
//! connection settings for the upstream service. Loading is capability
//! based: files are opened through a `cap-std` directory handle rather than
//! ambient paths.

mod error;
mod loader;
mod model;
mod parameters;
mod validation;

pub use error::{ConfigurationError, ConfigurationResult};
pub use loader::load_from_path;
pub use model::{BridgeConfiguration, BridgeParameters};
pub use parameters::{IDENTITY_KEY, ParameterBlock};
pub use validation::{ValidationReport, ValidationWarning, validate};
