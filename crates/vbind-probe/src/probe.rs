//! Version probe trait.

use async_trait::async_trait;
use vbind_core::Version;

use crate::error::ProbeResult;

/// Source of the external dependency's version.
///
/// Implementors report the version of the system the process talks to. A
/// probe is run once at startup by the [`VersionDetector`](crate::VersionDetector).
#[async_trait]
pub trait VersionProbe: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Ask the external system for its version.
    async fn probe(&self) -> ProbeResult<Version>;
}
