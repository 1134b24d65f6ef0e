//! Startup version detection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, warn};
use vbind_core::Version;

use crate::error::{ProbeError, ProbeResult};
use crate::probe::VersionProbe;
use crate::retry::RetryPolicy;

/// Granularity of the version handed to the selector.
///
/// Registries are keyed by whole release lines, so the default drops minor
/// and patch before selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VersionKey {
    /// Keep only the major release line (`7.10.2` becomes `7.0.0`).
    #[default]
    Major,
    /// Use the version exactly as reported.
    Full,
}

impl VersionKey {
    /// Normalise a reported version to this granularity.
    #[must_use]
    pub const fn apply(self, version: Version) -> Version {
        match self {
            Self::Major => version.major_line(),
            Self::Full => version,
        }
    }
}

impl FromStr for VersionKey {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "full" => Ok(Self::Full),
            _ => Err(ProbeError::InvalidVersionKey(s.to_string())),
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => f.write_str("major"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Determines the version the selectors are built for.
///
/// A pinned version short-circuits probing. Otherwise the probe is run with
/// retries until it succeeds, fails permanently, or the attempt budget is
/// spent.
#[derive(Clone)]
pub struct VersionDetector {
    probe: Option<Arc<dyn VersionProbe>>,
    pinned: Option<Version>,
    key: VersionKey,
    retry: RetryPolicy,
}

impl VersionDetector {
    /// Create a detector that asks `probe`.
    #[must_use]
    pub fn new(probe: impl VersionProbe + 'static) -> Self {
        Self::with_shared_probe(Arc::new(probe))
    }

    /// Create a detector around an already shared probe.
    #[must_use]
    pub fn with_shared_probe(probe: Arc<dyn VersionProbe>) -> Self {
        Self {
            probe: Some(probe),
            pinned: None,
            key: VersionKey::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Create a detector that never probes and always reports `version`.
    #[must_use]
    pub fn pinned(version: Version) -> Self {
        Self {
            probe: None,
            pinned: Some(version),
            key: VersionKey::default(),
            retry: RetryPolicy::once(),
        }
    }

    /// Pin the version, skipping the probe when `Some`.
    #[must_use]
    pub fn with_pinned(mut self, version: Option<Version>) -> Self {
        self.pinned = version;
        self
    }

    /// Set the granularity of the detected version.
    #[must_use]
    pub fn with_key(mut self, key: VersionKey) -> Self {
        self.key = key;
        self
    }

    /// Set the retry policy used while probing.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Version granularity in effect.
    #[must_use]
    pub fn key(&self) -> VersionKey {
        self.key
    }

    /// Pinned version, if any.
    #[must_use]
    pub fn pinned_version(&self) -> Option<Version> {
        self.pinned
    }

    /// Determine the version, normalised to the configured granularity.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::NoHosts`] if nothing is pinned and no probe is set.
    /// - The probe's own error if it is not retryable.
    /// - [`ProbeError::Exhausted`] wrapping the last error once every attempt
    ///   failed.
    pub async fn detect(&self) -> ProbeResult<Version> {
        if let Some(pinned) = self.pinned {
            let version = self.key.apply(pinned);
            info!(
                pinned = %pinned,
                version = %version,
                "using configured search version, skipping probe"
            );
            return Ok(version);
        }

        let probe = self.probe.as_ref().ok_or(ProbeError::NoHosts)?;
        let mut attempt: u32 = 0;
        loop {
            let delay = self.retry.delay_for_attempt(attempt);
            if !delay.is_zero() {
                debug!(attempt, delay = ?delay, "waiting before next probe");
                tokio::time::sleep(delay).await;
            }
            attempt = attempt.saturating_add(1);

            match probe.probe().await {
                Ok(reported) => {
                    let version = self.key.apply(reported);
                    info!(
                        probe = probe.name(),
                        reported = %reported,
                        version = %version,
                        "detected search version"
                    );
                    return Ok(version);
                },
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if self.retry.should_retry(attempt) => {
                    warn!(
                        probe = probe.name(),
                        attempt,
                        max_attempts = self.retry.max_attempts(),
                        error = %e,
                        "version probe failed, retrying"
                    );
                },
                Err(e) => {
                    return Err(ProbeError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                },
            }
        }
    }
}

impl fmt::Debug for VersionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionDetector")
            .field("probe", &self.probe.as_ref().map(|p| p.name()))
            .field("pinned", &self.pinned)
            .field("key", &self.key)
            .field("retry", &self.retry)
            .finish()
    }
}
