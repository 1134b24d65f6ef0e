//! Probe error types.

use thiserror::Error;
use vbind_core::VersionParseError;

/// Errors that can occur while detecting the external version.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Probing was requested but no host is configured.
    #[error("no search hosts configured")]
    NoHosts,

    /// A configured host is not a usable URL.
    #[error("invalid host {host}: {reason}")]
    InvalidHost {
        /// Host as configured.
        host: String,
        /// Why it was rejected.
        reason: String,
    },

    /// None of the configured hosts answered.
    #[error("no search host answered ({attempted} tried), last error: {last}")]
    Unreachable {
        /// Number of hosts tried.
        attempted: usize,
        /// Last per-host failure.
        last: String,
    },

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("search host {host} returned status {status}")]
    Status {
        /// Host that answered.
        host: String,
        /// HTTP status code.
        status: u16,
    },

    /// The host answered but the document carries no version.
    #[error("invalid version response from {host}: {reason}")]
    InvalidResponse {
        /// Host that answered.
        host: String,
        /// What was wrong with the response.
        reason: String,
    },

    /// The reported version string could not be parsed.
    #[error("invalid version string: {0}")]
    InvalidVersion(#[from] VersionParseError),

    /// Unknown version key granularity.
    #[error("unknown version key: {0} (expected \"major\" or \"full\")")]
    InvalidVersionKey(String),

    /// Every attempt failed.
    #[error("version detection failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Error of the final attempt.
        last: Box<ProbeError>,
    },
}

impl ProbeError {
    /// Returns true if trying again later might succeed.
    ///
    /// Only transport failures qualify. A host that answered with a document
    /// that carries no usable version will answer the same way next time.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable { .. } | Self::Http(_) | Self::Status { .. }
        )
    }
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
