//! vbind Provider - Version-aware selection of capability implementations.
//!
//! This crate provides:
//! - The [`Factory`] trait for deferred construction of implementations
//! - An immutable [`Registry`] of version-tagged factories and its builder
//! - [`VersionAwareProvider`], which resolves the implementation registered
//!   for the version detected at startup
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! use vbind_core::Version;
//! use vbind_provider::{ProviderError, Registry, VersionAwareProvider};
//!
//! let registry: Registry<&'static str, Infallible> = Registry::builder()
//!     .bind(Version::major(7), || Ok("impl-v7"))
//!     .bind(Version::major(8), || Ok("impl-v8"))
//!     .build()
//!     .unwrap();
//! let registry = Arc::new(registry);
//!
//! let provider = VersionAwareProvider::new(Version::major(7), Arc::clone(&registry));
//! assert_eq!(provider.resolve().unwrap(), "impl-v7");
//!
//! let provider = VersionAwareProvider::new(Version::major(9), registry);
//! assert!(matches!(
//!     provider.resolve(),
//!     Err(ProviderError::MissingImplementation { .. })
//! ));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod factory;
mod provider;
mod registry;

pub use error::{ProviderError, ProviderResult, RegistryError, RegistryResult};
pub use factory::{Factory, SharedFactory, SingletonFactory};
pub use provider::VersionAwareProvider;
pub use registry::{Registry, RegistryBuilder};
