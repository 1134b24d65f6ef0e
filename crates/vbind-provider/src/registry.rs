//! Immutable version-to-factory registry.
//!
//! The registry is assembled once by the wiring layer through a
//! [`RegistryBuilder`] and then shared read-only with every selector.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;
use vbind_core::Version;

use crate::error::{RegistryError, RegistryResult};
use crate::factory::{Factory, SharedFactory};

/// Mapping from version keys to the factories of their implementations.
///
/// Keys are unique; insertion order carries no meaning. The registry may be
/// empty. Cloning is cheap: factories are shared, not copied.
pub struct Registry<T, E, K = Version> {
    bindings: HashMap<K, SharedFactory<T, E>>,
}

impl<T, E, K> Registry<T, E, K>
where
    K: Eq + Hash,
{
    /// Create a registry with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Start assembling a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder<T, E, K> {
        RegistryBuilder::new()
    }

    /// Look up the factory bound to exactly this version.
    #[must_use]
    pub fn get(&self, version: &K) -> Option<&SharedFactory<T, E>> {
        self.bindings.get(version)
    }

    /// Returns true if a factory is bound to exactly this version.
    #[must_use]
    pub fn contains(&self, version: &K) -> bool {
        self.bindings.contains_key(version)
    }

    /// Number of bound versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over the bound versions in no particular order.
    pub fn versions(&self) -> impl Iterator<Item = &K> + '_ {
        self.bindings.keys()
    }
}

impl<T, E, K> Default for Registry<T, E, K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E, K> Clone for Registry<T, E, K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}

impl<T, E, K> fmt::Debug for Registry<T, E, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("versions", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Registry`].
///
/// Binding the same version twice is a wiring defect and is reported by
/// [`RegistryBuilder::build`].
pub struct RegistryBuilder<T, E, K = Version> {
    bindings: HashMap<K, SharedFactory<T, E>>,
    duplicates: Vec<K>,
}

impl<T, E, K> RegistryBuilder<T, E, K>
where
    K: Eq + Hash,
{
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Bind a closure as the factory for a version.
    #[must_use]
    pub fn bind<F>(self, version: K, factory: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.bind_shared(version, Arc::new(factory))
    }

    /// Bind any [`Factory`] implementation for a version.
    #[must_use]
    pub fn bind_factory<F>(self, version: K, factory: F) -> Self
    where
        F: Factory<T, E> + 'static,
    {
        self.bind_shared(version, Arc::new(factory))
    }

    /// Bind an already shared factory for a version.
    #[must_use]
    pub fn bind_shared(mut self, version: K, factory: SharedFactory<T, E>) -> Self {
        if self.bindings.contains_key(&version) {
            self.duplicates.push(version);
        } else {
            self.bindings.insert(version, factory);
        }
        self
    }

    /// Bind every `(version, factory)` pair from an iterator.
    #[must_use]
    pub fn bind_all<I>(self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, SharedFactory<T, E>)>,
    {
        bindings
            .into_iter()
            .fold(self, |builder, (version, factory)| {
                builder.bind_shared(version, factory)
            })
    }
}

impl<T, E, K> RegistryBuilder<T, E, K>
where
    K: Eq + Hash + fmt::Display,
{
    /// Finish the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateBinding`] naming the first version
    /// that was bound more than once.
    pub fn build(self) -> RegistryResult<Registry<T, E, K>> {
        if let Some(version) = self.duplicates.first() {
            return Err(RegistryError::DuplicateBinding {
                version: version.to_string(),
            });
        }
        debug!(bindings = self.bindings.len(), "registry assembled");
        Ok(Registry {
            bindings: self.bindings,
        })
    }
}

impl<T, E, K> Default for RegistryBuilder<T, E, K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
