//! Probe returning a known version.

use async_trait::async_trait;
use vbind_core::Version;

use crate::error::ProbeResult;
use crate::probe::VersionProbe;

/// Probe that always reports the same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVersionProbe {
    version: Version,
}

impl FixedVersionProbe {
    /// Create a probe reporting `version`.
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }
}

#[async_trait]
impl VersionProbe for FixedVersionProbe {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn probe(&self) -> ProbeResult<Version> {
        Ok(self.version)
    }
}
