//! vbind Probe - Startup detection of the external dependency's version.
//!
//! This crate provides:
//! - The [`VersionProbe`] trait and its implementations: a
//!   [`FixedVersionProbe`] and an [`HttpVersionProbe`] that asks the
//!   configured hosts for their root document
//! - [`VersionDetector`], which honours a pinned version, retries the probe
//!   with exponential backoff and normalises the result to the granularity
//!   the registry is keyed by

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod detector;
mod error;
mod fixed;
mod http;
mod probe;
mod retry;

pub use detector::{VersionDetector, VersionKey};
pub use error::{ProbeError, ProbeResult};
pub use fixed::FixedVersionProbe;
pub use http::{HttpVersionProbe, parse_root_response};
pub use probe::VersionProbe;
pub use retry::RetryPolicy;
