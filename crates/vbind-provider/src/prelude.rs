//! Prelude module - commonly used types for convenient import.
//!
//! Use `use vbind_provider::prelude::*;` to import all essential types.

// Errors
pub use crate::{ProviderError, ProviderResult, RegistryError, RegistryResult};

// Factories
pub use crate::{Factory, SharedFactory, SingletonFactory};

// Registry and selection
pub use crate::{Registry, RegistryBuilder, VersionAwareProvider};
