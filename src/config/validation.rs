//! Structural validation of configured devices.

use super::{BridgeConfiguration, ConfigurationError, ConfigurationResult, IDENTITY_KEY};
use tracing::{error, warn};

/// A non-fatal configuration problem attached to one device entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Position of the device in the `devices` list.
    pub device_index: usize,
    /// Human-readable description of the problem.
    pub message: String,
}

/// Non-fatal findings collected while validating a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Returns the collected warnings in device order.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Returns whether validation found nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, device_index: usize, text: impl Into<String>) {
        let message = text.into();
        warn!(device_index, %message, "device configuration warning");
        self.warnings.push(ValidationWarning {
            device_index,
            message,
        });
    }
}

/// Checks every configured device for mandatory fields.
///
/// A device without an interface id that is not self-describing is logged
/// and reported as a warning; it will surface later as an unpublished
/// interface. A device without adapter parameters, or whose parameter block
/// lacks an adapter identity, is also only a warning: the match engine skips
/// it, so announcements meant for it end in a no-match.
///
/// # Errors
///
/// Returns [`ConfigurationError::Invalid`] naming the first device whose
/// discovery parameters lack an identity.
pub fn validate(config: &BridgeConfiguration) -> ConfigurationResult<ValidationReport> {
    let mut report = ValidationReport::default();

    for (device_index, device) in config.devices().iter().enumerate() {
        if device.interface_id().is_none() && !device.is_self_describing() {
            report.warn(
                device_index,
                "device declares neither an interface id nor self-describing",
            );
        }

        match device.adapter_parameters() {
            None => report.warn(device_index, "missing adapter parameters"),
            Some(adapter_parameters) if adapter_parameters.identity().is_none() => report.warn(
                device_index,
                format!("adapter parameters are missing '{IDENTITY_KEY}'"),
            ),
            Some(_) => {}
        }

        if let Some(discovery_parameters) = device.discovery_parameters()
            && discovery_parameters.identity().is_none()
        {
            return Err(invalid(
                device_index,
                format!("discovery parameters are missing '{IDENTITY_KEY}'"),
            ));
        }
    }

    Ok(report)
}

fn invalid(device_index: usize, text: impl Into<String>) -> ConfigurationError {
    let reason = text.into();
    error!(device_index, %reason, "invalid device configuration");
    ConfigurationError::Invalid {
        device_index,
        reason,
    }
}
