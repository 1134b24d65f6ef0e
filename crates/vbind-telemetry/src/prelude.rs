//! Prelude module - commonly used types for convenient import.
//!
//! Use `use vbind_telemetry::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust,no_run
//! use vbind_telemetry::prelude::*;
//!
//! # fn main() -> TelemetryResult<()> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("vbind_provider=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("resolving implementations");
//! # Ok(())
//! # }
//! ```

// Errors
pub use crate::{TelemetryError, TelemetryResult};

// Logging configuration
pub use crate::{FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget};

// Setup functions
pub use crate::{setup_default_logging, setup_logging};
