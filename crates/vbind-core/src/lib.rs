//! vbind Core - Foundation types shared across the vbind workspace.
//!
//! This crate provides:
//! - The [`Version`] key used to tag version-specific implementations
//! - Parsing of the version strings reported by external systems

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod version;

pub use version::{Version, VersionParseError};
