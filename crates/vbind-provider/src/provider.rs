//! Version-aware selection of an implementation.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, trace};
use vbind_core::Version;

use crate::error::{ProviderError, ProviderResult};
use crate::factory::Factory;
use crate::registry::Registry;

/// Hands out the implementation registered for the version detected at
/// startup.
///
/// The detected version is fixed for the lifetime of the provider. Every call
/// to [`resolve`](Self::resolve) performs an exact-match lookup and invokes
/// the selected factory anew; the provider never caches results.
///
/// Both fields are read-only after construction, so a provider can be shared
/// across threads and resolved concurrently.
pub struct VersionAwareProvider<T, E, K = Version> {
    version: K,
    bindings: Arc<Registry<T, E, K>>,
}

impl<T, E, K> VersionAwareProvider<T, E, K>
where
    K: Eq + Hash + fmt::Display,
{
    /// Create a selector for `version` over a shared registry.
    #[must_use]
    pub fn new(version: K, bindings: Arc<Registry<T, E, K>>) -> Self {
        Self { version, bindings }
    }

    /// The version this selector resolves against.
    #[must_use]
    pub fn version(&self) -> &K {
        &self.version
    }

    /// The registry this selector resolves from.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry<T, E, K>> {
        &self.bindings
    }

    /// Returns true if an implementation is registered for the version.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.bindings.contains(&self.version)
    }

    /// Produce the implementation registered for the detected version.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingImplementation`] if no factory is bound to
    ///   exactly this version. No other factory is invoked.
    /// - [`ProviderError::Factory`] carrying the factory's own error if the
    ///   selected factory fails.
    pub fn resolve(&self) -> ProviderResult<T, E> {
        let Some(factory) = self.bindings.get(&self.version) else {
            debug!(
                version = %self.version,
                bound = self.bindings.len(),
                "no implementation registered for version"
            );
            return Err(ProviderError::missing(&self.version));
        };
        trace!(version = %self.version, "resolving implementation");
        factory.create().map_err(ProviderError::Factory)
    }
}

impl<T, E, K> Factory<T, ProviderError<E>> for VersionAwareProvider<T, E, K>
where
    K: Eq + Hash + fmt::Display + Send + Sync,
{
    fn create(&self) -> ProviderResult<T, E> {
        self.resolve()
    }
}

impl<T, E, K> Clone for VersionAwareProvider<T, E, K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            version: self.version.clone(),
            bindings: Arc::clone(&self.bindings),
        }
    }
}

impl<T, E, K> fmt::Debug for VersionAwareProvider<T, E, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionAwareProvider")
            .field("version", &self.version)
            .field("bindings", &self.bindings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use thiserror::Error;

    #[derive(Debug, PartialEq, Eq, Error)]
    #[error("connection refused by {0}")]
    struct ConnectError(String);

    /// A freshly constructed client tagged with the line it speaks.
    #[derive(Debug, PartialEq, Eq)]
    struct Client {
        line: &'static str,
        serial: usize,
    }

    fn labelled_registry() -> Arc<Registry<&'static str, Infallible, &'static str>> {
        Arc::new(
            Registry::builder()
                .bind("V7", || Ok("impl-v7"))
                .bind("V8", || Ok("impl-v8"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_resolves_registered_version() {
        let provider = VersionAwareProvider::new("V7", labelled_registry());
        assert_eq!(provider.resolve().unwrap(), "impl-v7");
        assert!(provider.is_satisfied());
        assert_eq!(*provider.version(), "V7");
    }

    #[test]
    fn test_unregistered_version_is_missing_implementation() {
        let provider = VersionAwareProvider::new("V9", labelled_registry());
        let err = provider.resolve().unwrap_err();

        assert!(err.is_missing_implementation());
        assert_eq!(err.to_string(), "incomplete implementation for version \"V9\"");
        assert!(!provider.is_satisfied());
    }

    #[test]
    fn test_empty_registry_always_missing() {
        let registry: Arc<Registry<u8, Infallible>> = Arc::new(Registry::empty());
        for major in [6, 7, 8] {
            let provider = VersionAwareProvider::new(Version::major(major), Arc::clone(&registry));
            assert!(matches!(
                provider.resolve(),
                Err(ProviderError::MissingImplementation { .. })
            ));
        }
    }

    #[test]
    fn test_only_selected_factory_invoked_each_time() {
        let v7_calls = Arc::new(AtomicUsize::new(0));
        let v8_calls = Arc::new(AtomicUsize::new(0));
        let (c7, c8) = (Arc::clone(&v7_calls), Arc::clone(&v8_calls));

        let registry: Registry<Client, Infallible> = Registry::builder()
            .bind(Version::major(7), move || {
                Ok(Client {
                    line: "7",
                    serial: c7.fetch_add(1, Ordering::SeqCst),
                })
            })
            .bind(Version::major(8), move || {
                Ok(Client {
                    line: "8",
                    serial: c8.fetch_add(1, Ordering::SeqCst),
                })
            })
            .build()
            .unwrap();
        let provider = VersionAwareProvider::new(Version::major(8), Arc::new(registry));

        let first = provider.resolve().unwrap();
        let second = provider.resolve().unwrap();

        assert_eq!(first, Client { line: "8", serial: 0 });
        assert_eq!(second, Client { line: "8", serial: 1 });
        assert_eq!(v8_calls.load(Ordering::SeqCst), 2);
        assert_eq!(v7_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_version_invokes_no_factory() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry: Registry<(), Infallible> = Registry::builder()
            .bind(Version::major(7), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .build()
            .unwrap();
        let provider = VersionAwareProvider::new(Version::new(7, 10, 2), Arc::new(registry));

        assert!(provider.resolve().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_factory_error_propagates_unchanged() {
        let registry: Registry<u32, ConnectError> = Registry::builder()
            .bind(Version::major(7), || Err(ConnectError("es-7:9200".to_string())))
            .build()
            .unwrap();
        let provider = VersionAwareProvider::new(Version::major(7), Arc::new(registry));

        let err = provider.resolve().unwrap_err();
        assert_eq!(err.to_string(), "connection refused by es-7:9200");
        assert_eq!(
            err.into_factory_error(),
            Some(ConnectError("es-7:9200".to_string()))
        );
    }

    #[test]
    fn test_provider_is_a_factory() {
        let provider = VersionAwareProvider::new("V8", labelled_registry());
        let nested: Registry<&'static str, ProviderError<Infallible>> = Registry::builder()
            .bind_factory(Version::major(1), provider)
            .build()
            .unwrap();

        let outer = VersionAwareProvider::new(Version::major(1), Arc::new(nested));
        assert_eq!(outer.resolve().unwrap(), "impl-v8");
    }

    #[test]
    fn test_concurrent_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry: Registry<usize, Infallible> = Registry::builder()
            .bind(Version::major(7), move || Ok(counter.fetch_add(1, Ordering::SeqCst)))
            .build()
            .unwrap();
        let provider = Arc::new(VersionAwareProvider::new(
            Version::major(7),
            Arc::new(registry),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| provider.resolve().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut serials: Vec<usize> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        serials.sort_unstable();
        serials.dedup();

        assert_eq!(serials.len(), 200);
        assert_eq!(calls.load(Ordering::SeqCst), 200);
    }

    #[test]
    fn test_debug_output() {
        let provider = VersionAwareProvider::new("V7", labelled_registry());
        let debug = format!("{provider:?}");
        assert!(debug.starts_with("VersionAwareProvider { version: \"V7\""));
    }
}
