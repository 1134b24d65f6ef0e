//! Startup wiring from configuration.
//!
//! Turns the plain config sections into the domain types of the other
//! crates: the version detector with its probe and retry budget, the log
//! subscriber, and finally the selector over a caller-supplied registry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use vbind_config::{Config, ProbeSection, SearchSection};
use vbind_core::Version;
use vbind_probe::{HttpVersionProbe, RetryPolicy, VersionDetector, VersionKey, VersionProbe};
use vbind_provider::{Registry, VersionAwareProvider};
use vbind_telemetry::{LogConfig, setup_logging};

use crate::error::BootstrapResult;

/// Parse the pinned version, if one is configured.
///
/// # Errors
///
/// Returns [`BootstrapError::PinnedVersion`](crate::BootstrapError::PinnedVersion)
/// if the configured string is not a version.
pub fn pinned_version(search: &SearchSection) -> BootstrapResult<Option<Version>> {
    Ok(search.version.as_deref().map(Version::parse).transpose()?)
}

/// Parse the configured version key granularity.
///
/// # Errors
///
/// Returns an error if the key is neither `major` nor `full`.
pub fn version_key(search: &SearchSection) -> BootstrapResult<VersionKey> {
    Ok(search.version_key.parse()?)
}

/// Retry policy described by the `[probe]` section.
#[must_use]
pub fn retry_policy(probe: &ProbeSection) -> RetryPolicy {
    RetryPolicy::new(
        probe.max_attempts,
        Duration::from_millis(probe.initial_delay_ms),
        Duration::from_millis(probe.max_delay_ms),
    )
}

/// Build a detector around `probe`, honouring the pinned version, version
/// key and retry budget from `config`.
///
/// # Errors
///
/// Returns an error if the pinned version or the version key is invalid.
pub fn detector_with_probe(
    config: &Config,
    probe: impl VersionProbe + 'static,
) -> BootstrapResult<VersionDetector> {
    Ok(VersionDetector::new(probe)
        .with_pinned(pinned_version(&config.search)?)
        .with_key(version_key(&config.search)?)
        .with_retry(retry_policy(&config.probe)))
}

/// Build the detector described by `config`.
///
/// With a pinned version no probe is created, so `search.hosts` may be empty.
/// Otherwise the configured hosts are probed over HTTP.
///
/// # Errors
///
/// Returns an error if the pinned version, version key or a host is invalid,
/// or the HTTP client cannot be built.
pub fn detector_from_config(config: &Config) -> BootstrapResult<VersionDetector> {
    if let Some(pinned) = pinned_version(&config.search)? {
        return Ok(VersionDetector::pinned(pinned).with_key(version_key(&config.search)?));
    }

    let probe = HttpVersionProbe::new(
        &config.search.hosts,
        Duration::from_secs(config.probe.timeout_secs),
    )?;
    detector_with_probe(config, probe)
}

/// Detect the external version as configured.
///
/// # Errors
///
/// Returns an error if the detector cannot be built or detection fails.
pub async fn detect_version(config: &Config) -> BootstrapResult<Version> {
    let detector = detector_from_config(config)?;
    Ok(detector.detect().await?)
}

/// Install the global log subscriber described by the `[logging]` section.
///
/// # Errors
///
/// Returns an error if the section is invalid or a subscriber is already set.
pub fn init_logging(config: &Config) -> BootstrapResult<()> {
    let log_config = LogConfig::try_from(&config.logging)?;
    setup_logging(&log_config)?;
    Ok(())
}

/// Build the selector for `registry` from an already detected version.
///
/// An unsatisfied selector is not an error here; the gap is reported as
/// `MissingImplementation` when the implementation is requested.
#[must_use]
pub fn provider_for<T, E>(
    version: Version,
    registry: Arc<Registry<T, E>>,
) -> VersionAwareProvider<T, E> {
    let provider = VersionAwareProvider::new(version, registry);
    if provider.is_satisfied() {
        info!(version = %version, "implementation registered for detected version");
    } else {
        let mut bound: Vec<String> = provider
            .registry()
            .versions()
            .map(ToString::to_string)
            .collect();
        bound.sort_unstable();
        warn!(
            version = %version,
            bound = ?bound,
            "no implementation registered for detected version"
        );
    }
    provider
}

/// Detect the version as configured and build the selector for `registry`.
///
/// # Errors
///
/// Returns an error if detection fails.
pub async fn build_provider<T, E>(
    config: &Config,
    registry: Arc<Registry<T, E>>,
) -> BootstrapResult<VersionAwareProvider<T, E>> {
    let version = detect_version(config).await?;
    Ok(provider_for(version, registry))
}
