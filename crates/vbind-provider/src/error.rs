//! Provider error types.

use thiserror::Error;

/// Errors returned when resolving a version-specific implementation.
///
/// `E` is the error type of the registered factories. Factory failures are
/// carried as-is in [`ProviderError::Factory`] and display exactly like the
/// original error.
#[derive(Debug, Error)]
pub enum ProviderError<E> {
    /// No implementation is registered for the detected version.
    ///
    /// The set of version-specific implementations wired at startup is
    /// incomplete. Retrying cannot succeed without rewiring.
    #[error("incomplete implementation for version \"{version}\"")]
    MissingImplementation {
        /// Display form of the unmatched version.
        version: String,
    },

    /// The selected factory failed.
    #[error("{0}")]
    Factory(E),
}

impl<E> ProviderError<E> {
    /// Creates a missing-implementation error for the given version.
    pub fn missing(version: &impl std::fmt::Display) -> Self {
        Self::MissingImplementation {
            version: version.to_string(),
        }
    }

    /// Returns true if no implementation was registered for the version.
    #[must_use]
    pub fn is_missing_implementation(&self) -> bool {
        matches!(self, Self::MissingImplementation { .. })
    }

    /// Returns the factory's own error, if the factory was the one failing.
    pub fn into_factory_error(self) -> Option<E> {
        match self {
            Self::Factory(e) => Some(e),
            Self::MissingImplementation { .. } => None,
        }
    }
}

/// Result type for implementation resolution.
pub type ProviderResult<T, E> = Result<T, ProviderError<E>>;

/// Errors raised while assembling a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two factories were bound to the same version.
    #[error("duplicate binding for version \"{version}\"")]
    DuplicateBinding {
        /// Display form of the version bound more than once.
        version: String,
    },
}

/// Result type for registry assembly.
pub type RegistryResult<T> = Result<T, RegistryError>;
