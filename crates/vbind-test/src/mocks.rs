//! Mock implementations for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use vbind_core::Version;
use vbind_probe::{ProbeError, ProbeResult, VersionProbe};
use vbind_provider::Factory;

/// Error produced by the mock factories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test factory failed: {0}")]
pub struct TestError(pub String);

/// Object produced by [`CountingFactory`]: a tag plus a per-factory serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedImpl {
    /// Tag of the factory that built it.
    pub tag: String,
    /// Zero-based construction number within that factory.
    pub serial: usize,
}

/// Factory building a fresh [`TaggedImpl`] on every call and counting calls.
///
/// Clones share the counter, so a clone kept by the test observes calls made
/// through the registry.
#[derive(Debug, Clone)]
pub struct CountingFactory {
    tag: String,
    calls: Arc<AtomicUsize>,
}

impl CountingFactory {
    /// Create a factory whose objects carry `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of objects built so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Tag carried by the built objects.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<E> Factory<TaggedImpl, E> for CountingFactory {
    fn create(&self) -> Result<TaggedImpl, E> {
        let serial = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TaggedImpl {
            tag: self.tag.clone(),
            serial,
        })
    }
}

/// Factory that always fails with a [`TestError`] and counts calls.
#[derive(Debug, Clone)]
pub struct FailingFactory {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingFactory {
    /// Create a factory failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of attempted constructions.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T> Factory<T, TestError> for FailingFactory {
    fn create(&self) -> Result<T, TestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TestError(self.message.clone()))
    }
}

/// Version probe replaying queued results.
///
/// Once the queue is drained the probe reports the fallback version if one
/// is set, otherwise it fails as unreachable.
#[derive(Debug, Clone, Default)]
pub struct StubProbe {
    results: Arc<Mutex<VecDeque<ProbeResult<Version>>>>,
    fallback: Option<Version>,
    calls: Arc<AtomicUsize>,
}

impl StubProbe {
    /// Create a probe with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful probe.
    #[must_use]
    pub fn with_version(self, version: Version) -> Self {
        self.push(Ok(version));
        self
    }

    /// Queue a failed probe.
    #[must_use]
    pub fn with_error(self, error: ProbeError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queue `count` unreachable failures.
    #[must_use]
    pub fn with_unreachable(self, count: usize) -> Self {
        for _ in 0..count {
            self.push(Err(unreachable()));
        }
        self
    }

    /// Version reported once the queue is empty.
    #[must_use]
    pub fn with_fallback(mut self, version: Version) -> Self {
        self.fallback = Some(version);
        self
    }

    /// Number of times the probe ran.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, result: ProbeResult<Version>) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }
}

fn unreachable() -> ProbeError {
    ProbeError::Unreachable {
        attempted: 1,
        last: "connection refused".to_string(),
    }
}

#[async_trait]
impl VersionProbe for StubProbe {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn probe(&self) -> ProbeResult<Version> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match (next, self.fallback) {
            (Some(result), _) => result,
            (None, Some(version)) => Ok(version),
            (None, None) => Err(unreachable()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_factory_builds_fresh_objects() {
        let factory = CountingFactory::new("impl-v7");
        let handle = factory.clone();

        let first: Result<TaggedImpl, TestError> = factory.create();
        let second: Result<TaggedImpl, TestError> = factory.create();

        assert_eq!(first.unwrap().serial, 0);
        assert_eq!(second.unwrap().serial, 1);
        assert_eq!(handle.calls(), 2);
        assert_eq!(handle.tag(), "impl-v7");
    }

    #[test]
    fn test_failing_factory() {
        let factory = FailingFactory::new("cluster handshake failed");
        let result: Result<u8, TestError> = factory.create();

        assert_eq!(result, Err(TestError("cluster handshake failed".to_string())));
        assert_eq!(factory.calls(), 1);
    }

    #[tokio::test]
    async fn test_stub_probe_replays_queue() {
        let probe = StubProbe::new()
            .with_unreachable(1)
            .with_version(Version::new(7, 10, 2))
            .with_fallback(Version::major(8));

        assert!(probe.probe().await.is_err());
        assert_eq!(probe.probe().await.unwrap(), Version::new(7, 10, 2));
        assert_eq!(probe.probe().await.unwrap(), Version::major(8));
        assert_eq!(probe.calls(), 3);

        let empty = StubProbe::new();
        assert!(matches!(
            empty.probe().await,
            Err(ProbeError::Unreachable { .. })
        ));
    }
}
