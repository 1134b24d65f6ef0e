//! Configuration types for vbind.
//!
//! Every struct implements [`Default`] matching `defaults.toml`, so a bare
//! `[section]` header in TOML produces a working configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search cluster whose version drives implementation selection.
    pub search: SearchSection,
    /// Retry budget of the startup version probe.
    pub probe: ProbeSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// SearchSection
// ---------------------------------------------------------------------------

/// Search cluster location and version handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Pinned cluster version (e.g. `"7"` or `"7.10.2"`). When set, the
    /// cluster is never probed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Cluster nodes asked for their version, in order.
    pub hosts: Vec<String>,
    /// Granularity implementations are registered by: `"major"` or `"full"`.
    pub version_key: String,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            version: None,
            hosts: vec!["http://127.0.0.1:9200".to_owned()],
            version_key: "major".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProbeSection
// ---------------------------------------------------------------------------

/// Version probe timeouts and retry backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSection {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Total probe attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound on the delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_attempts: 3,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["vbind_probe=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}
