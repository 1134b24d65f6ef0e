//! Unified prelude.
//!
//! `use vbind::prelude::*;` brings in the commonly used types of every vbind
//! crate.

pub use vbind_core::prelude::*;
pub use vbind_probe::prelude::*;
pub use vbind_provider::prelude::*;
pub use vbind_telemetry::prelude::*;

pub use vbind_config::{Config, ConfigError, ConfigResult, ResolvedConfig};

pub use crate::{BootstrapError, BootstrapResult};
