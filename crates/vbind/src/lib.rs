//! vbind - Version-aware selection of capability implementations.
//!
//! A process that talks to an external system with several incompatible
//! release lines registers one implementation per line, detects the line it
//! is actually talking to once at startup, and from then on hands out the
//! matching implementation.
//!
//! This crate re-exports the per-crate preludes and adds [`wiring`], which
//! builds the startup pieces from a loaded [`Config`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vbind::prelude::*;
//!
//! # #[derive(Debug)] struct Es7; #[derive(Debug)] struct Es8;
//! # trait SearchClient: Send {}
//! # impl SearchClient for Es7 {}
//! # impl SearchClient for Es8 {}
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolved = Config::load(None)?;
//! vbind::wiring::init_logging(&resolved.config)?;
//!
//! let registry: Registry<Box<dyn SearchClient>, std::io::Error> = Registry::builder()
//!     .bind(Version::major(7), || Ok(Box::new(Es7) as Box<dyn SearchClient>))
//!     .bind(Version::major(8), || Ok(Box::new(Es8) as Box<dyn SearchClient>))
//!     .build()?;
//!
//! let provider = vbind::wiring::build_provider(&resolved.config, Arc::new(registry)).await?;
//! let client = provider.resolve()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;
pub mod wiring;

mod error;

pub use error::{BootstrapError, BootstrapResult};

pub use vbind_config::Config;
pub use vbind_core::{Version, VersionParseError};
pub use vbind_probe::{VersionDetector, VersionKey, VersionProbe};
pub use vbind_provider::{Factory, ProviderError, Registry, VersionAwareProvider};
