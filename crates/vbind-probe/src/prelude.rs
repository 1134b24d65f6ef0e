//! Prelude module - commonly used types for convenient import.
//!
//! Use `use vbind_probe::prelude::*;` to import all essential types.

pub use crate::{ProbeError, ProbeResult};

pub use crate::{FixedVersionProbe, HttpVersionProbe, VersionProbe};

pub use crate::{RetryPolicy, VersionDetector, VersionKey};
