//! Startup error type.

use thiserror::Error;
use vbind_config::ConfigError;
use vbind_core::VersionParseError;
use vbind_probe::ProbeError;
use vbind_telemetry::TelemetryError;

/// Errors raised while wiring the process up from configuration.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Loading or validating configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The pinned version in configuration does not parse.
    #[error("invalid search.version: {0}")]
    PinnedVersion(#[from] VersionParseError),

    /// Detecting the external version failed.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Logging could not be set up.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Result type for startup wiring.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
