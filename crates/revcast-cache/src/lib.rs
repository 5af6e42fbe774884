//! Forecast cache providers.
//!
//! The cache is advisory: a miss is always recoverable from the durable
//! store, and writes are best-effort. Two providers are included: Redis
//! for deployments and an in-process moka cache for local runs and tests.

pub mod keys;
mod memory;
mod redis_cache;

pub use memory::MemoryForecastCache;
pub use redis_cache::RedisForecastCache;
