//! In-process forecast cache using moka.

use crate::keys::forecast_key;
use async_trait::async_trait;
use moka::future::Cache;
use revcast_core::forecast::Forecast;
use revcast_core::ports::ForecastCache;
use revcast_core::{Fingerprint, Result};
use std::sync::Arc;
use std::time::Duration;

/// Default cache capacity (number of entries).
const DEFAULT_CAPACITY: u64 = 10_000;

/// Default time-to-live for cache entries (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

/// In-process forecast cache for local runs and tests.
///
/// Expiry is cache-wide: the TTL passed to `put` is capped by the
/// time-to-live the cache was built with. Thread-safe and suitable for
/// concurrent access.
#[derive(Clone)]
pub struct MemoryForecastCache {
    cache: Cache<String, Arc<Forecast>>,
}

impl MemoryForecastCache {
    /// Creates a cache with default settings: 10k entries, 1 hour TTL.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and entry time-to-live.
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Number of entries currently resident.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drops every cached entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for MemoryForecastCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastCache for MemoryForecastCache {
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>> {
        let hit = self.cache.get(&forecast_key(fingerprint)).await;
        Ok(hit.map(|forecast| (*forecast).clone()))
    }

    async fn put(
        &self,
        fingerprint: &Fingerprint,
        forecast: &Forecast,
        _ttl: Duration,
    ) -> Result<()> {
        self.cache
            .insert(forecast_key(fingerprint), Arc::new(forecast.clone()))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use revcast_core::forecast::{ForecastType, ProjectionPoint};
    use revcast_core::ids::ForecastId;

    fn forecast(fingerprint: &Fingerprint) -> Forecast {
        Forecast {
            id: ForecastId::new(),
            forecast_type: ForecastType::Simple,
            fingerprint: fingerprint.clone(),
            projection: vec![ProjectionPoint {
                month: 1,
                revenue: 1000.0,
            }],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = MemoryForecastCache::new();
        let fp = Fingerprint::from_hex("aa".repeat(32));

        assert!(cache.get(&fp).await.unwrap().is_none());

        let f = forecast(&fp);
        cache
            .put(&fp, &f, Duration::from_secs(60))
            .await
            .unwrap();

        let hit = cache.get(&fp).await.unwrap().expect("expected cache hit");
        assert_eq!(hit.id, f.id);
    }

    #[tokio::test]
    async fn test_distinct_fingerprints_do_not_collide() {
        let cache = MemoryForecastCache::new();
        let fp_a = Fingerprint::from_hex("aa".repeat(32));
        let fp_b = Fingerprint::from_hex("bb".repeat(32));

        cache
            .put(&fp_a, &forecast(&fp_a), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.get(&fp_b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = MemoryForecastCache::new();
        let fp = Fingerprint::from_hex("cc".repeat(32));

        let first = forecast(&fp);
        let second = forecast(&fp);
        cache
            .put(&fp, &first, Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .put(&fp, &second, Duration::from_secs(60))
            .await
            .unwrap();

        let hit = cache.get(&fp).await.unwrap().unwrap();
        assert_eq!(hit.id, second.id);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = MemoryForecastCache::new();
        let fp = Fingerprint::from_hex("dd".repeat(32));

        cache
            .put(&fp, &forecast(&fp), Duration::from_secs(60))
            .await
            .unwrap();
        cache.invalidate_all();

        assert!(cache.get(&fp).await.unwrap().is_none());
    }
}
