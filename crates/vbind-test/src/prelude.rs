//! Prelude module - commonly used test utilities.

pub use crate::fixtures::{init_test_logging, test_registry, test_version, v7, v8, v9};
pub use crate::mocks::{CountingFactory, FailingFactory, StubProbe, TaggedImpl, TestError};
