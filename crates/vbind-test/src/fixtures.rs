//! Test fixtures for common types.

use vbind_core::Version;
use vbind_provider::Registry;

use crate::mocks::{CountingFactory, TaggedImpl, TestError};

/// Release line 7.
#[must_use]
pub const fn v7() -> Version {
    Version::major(7)
}

/// Release line 8.
#[must_use]
pub const fn v8() -> Version {
    Version::major(8)
}

/// Release line 9, never registered by [`test_registry`].
#[must_use]
pub const fn v9() -> Version {
    Version::major(9)
}

/// A full version as a cluster would report it.
#[must_use]
pub const fn test_version() -> Version {
    Version::new(7, 10, 2)
}

/// Registry with `impl-v7` bound to [`v7`] and `impl-v8` bound to [`v8`].
#[must_use]
pub fn test_registry() -> Registry<TaggedImpl, TestError> {
    test_registry_with_factories().0
}

/// Like [`test_registry`], also returning handles on the two factories.
#[must_use]
pub fn test_registry_with_factories() -> (
    Registry<TaggedImpl, TestError>,
    CountingFactory,
    CountingFactory,
) {
    let v7_factory = CountingFactory::new("impl-v7");
    let v8_factory = CountingFactory::new("impl-v8");
    let registry = Registry::builder()
        .bind_factory(v7(), v7_factory.clone())
        .bind_factory(v8(), v8_factory.clone())
        .build()
        .expect("fixture binds distinct versions");
    (registry, v7_factory, v8_factory)
}

/// Route `tracing` output through the test harness's captured writer.
///
/// Honours `RUST_LOG`. Safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
