//! Deferred constructors for capability implementations.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A zero-argument producer of a capability implementation.
///
/// Every call hands ownership of the produced value to the caller. Whether
/// successive calls return fresh or shared instances is the factory's own
/// policy (see [`SingletonFactory`]).
///
/// Any `Fn() -> Result<T, E> + Send + Sync` closure is a factory.
pub trait Factory<T, E>: Send + Sync {
    /// Produce an instance.
    ///
    /// # Errors
    ///
    /// Returns whatever error the construction of the instance raises.
    fn create(&self) -> Result<T, E>;
}

impl<T, E, F> Factory<T, E> for F
where
    F: Fn() -> Result<T, E> + Send + Sync,
{
    fn create(&self) -> Result<T, E> {
        self()
    }
}

/// Type-erased factory shared between registries.
pub type SharedFactory<T, E> = Arc<dyn Factory<T, E>>;

/// Factory that constructs its instance once and hands out clones.
///
/// Failed constructions are not remembered; the next call tries again.
pub struct SingletonFactory<T, E> {
    inner: SharedFactory<T, E>,
    instance: Mutex<Option<T>>,
}

impl<T, E> SingletonFactory<T, E>
where
    T: Clone + Send,
{
    /// Wrap a factory so that it only ever constructs one instance.
    pub fn new(inner: impl Factory<T, E> + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            instance: Mutex::new(None),
        }
    }

    /// Returns true once an instance has been constructed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.instance
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T, E> Factory<T, E> for SingletonFactory<T, E>
where
    T: Clone + Send,
{
    fn create(&self) -> Result<T, E> {
        // A panic inside the inner factory leaves the slot empty, so the
        // poisoned state carries no partial value.
        let mut slot = self
            .instance
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = slot.as_ref() {
            return Ok(instance.clone());
        }
        let instance = self.inner.create()?;
        *slot = Some(instance.clone());
        Ok(instance)
    }
}

impl<T, E> fmt::Debug for SingletonFactory<T, E>
where
    T: Clone + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonFactory")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_is_factory() {
        let factory = || Ok::<_, String>(42);
        assert_eq!(Factory::create(&factory), Ok(42));

        let failing = || Err::<u32, _>("boom".to_string());
        assert_eq!(Factory::create(&failing), Err("boom".to_string()));
    }

    #[test]
    fn test_singleton_constructs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let singleton = SingletonFactory::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(Arc::new("client".to_string()))
        });

        assert!(!singleton.is_initialized());
        let a = singleton.create().unwrap();
        let b = singleton.create().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(singleton.is_initialized());
    }

    #[test]
    fn test_singleton_retries_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let singleton = SingletonFactory::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("not ready".to_string())
            } else {
                Ok(7_u32)
            }
        });

        assert_eq!(singleton.create(), Err("not ready".to_string()));
        assert!(!singleton.is_initialized());
        assert_eq!(singleton.create(), Ok(7));
        assert_eq!(singleton.create(), Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
