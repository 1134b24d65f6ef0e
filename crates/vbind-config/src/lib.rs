#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for vbind.
//!
//! A single [`Config`] carries the search cluster settings that decide which
//! version-specific implementations get selected, the probe's retry budget,
//! and logging.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vbind_config::Config;
//!
//! // defaults → system → user → explicit file → env fallbacks
//! let resolved = Config::load(None).unwrap();
//! println!("probing {:?}", resolved.config.search.hosts);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit file** passed by the caller
//! 2. **User** (`~/.vbind/config.toml`)
//! 3. **System** (`/etc/vbind/config.toml`)
//! 4. **Environment variables** (`VBIND_*`), fallback only
//! 5. **Embedded defaults** (`defaults.toml` compiled into binary)
//!
//! This crate has no dependencies on other internal vbind crates. Turning
//! config values into domain types happens in the `vbind` facade.

use std::path::Path;

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging with precedence.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use merge::{ConfigLayer, FieldSources};
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, None)
    }

    /// Load configuration with an explicit home directory override.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load_with_home(explicit: Option<&Path>, home_dir: &Path) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, Some(home_dir))
    }

    /// Load a single file on top of the built-in defaults, without layering.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
