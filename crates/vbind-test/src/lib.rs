//! vbind Test - Shared test utilities for vbind.
//!
//! This crate provides mock factories, a scripted version probe and fixtures
//! that can be used across vbind crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! vbind-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use vbind_provider::VersionAwareProvider;
//! use vbind_test::{test_registry, v7};
//!
//! #[test]
//! fn test_selects_v7() {
//!     let provider = VersionAwareProvider::new(v7(), Arc::new(test_registry()));
//!     assert_eq!(provider.resolve().unwrap().tag, "impl-v7");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
