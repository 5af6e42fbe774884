//! Forecast orchestration pipeline.
//!
//! Coordinates the fingerprint, cache, durable store, and dispatch
//! components: persist the submission, check the cache, fall back to the
//! store, and only then dispatch a computation to the workers.

mod orchestrator;

pub use orchestrator::{ForecastOrchestrator, ForecastSource, Submission};
