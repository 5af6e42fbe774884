//! Integration test infrastructure for Revcast.
//!
//! In-memory fakes of every port let the orchestration suites run without
//! external services; the `integration` feature additionally gates
//! testcontainers-backed suites against real PostgreSQL, Redis, and NATS.
//!
//! # Usage
//!
//! ```ignore
//! use revcast_tests::TestHarness;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let harness = TestHarness::new();
//!     let submission = harness.orchestrator.submit(...).await.unwrap();
//! }
//! ```

pub mod containers;
pub mod fakes;
pub mod fixtures;
pub mod helpers;

pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,revcast_tests=debug")),
        )
        .with_test_writer()
        .try_init();
}
