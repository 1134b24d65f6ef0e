//! Prelude module - commonly used types for convenient import.
//!
//! Use `use vbind_core::prelude::*;` to import all essential types.

// Versioning
pub use crate::{Version, VersionParseError};
