//! Redis cache integration tests.
//!
//! Run with: `cargo test -p revcast-tests --test cache_tests --features integration`

#![cfg(feature = "integration")]

use revcast_cache::RedisForecastCache;
use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::{Forecast, ForecastType, ProjectionPoint};
use revcast_core::ids::ForecastId;
use revcast_core::ports::ForecastCache;
use revcast_tests::containers::RedisContainer;
use std::time::Duration;

fn forecast(fingerprint: &Fingerprint) -> Forecast {
    Forecast {
        id: ForecastId::new(),
        forecast_type: ForecastType::Simple,
        fingerprint: fingerprint.clone(),
        projection: vec![ProjectionPoint {
            month: 1,
            revenue: 12_500.0,
        }],
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_put_then_get_roundtrip() {
    revcast_tests::init_test_logging();
    let redis = RedisContainer::start().await.expect("Failed to start redis");
    let cache = RedisForecastCache::connect(redis.url()).await.unwrap();

    let fp = Fingerprint::from_hex("ab".repeat(32));
    let stored = forecast(&fp);

    cache
        .put(&fp, &stored, Duration::from_secs(60))
        .await
        .unwrap();

    let hit = cache.get(&fp).await.unwrap().expect("expected hit");
    assert_eq!(hit.id, stored.id);
    assert_eq!(hit.projection, stored.projection);
}

#[tokio::test]
async fn test_unknown_fingerprint_misses() {
    revcast_tests::init_test_logging();
    let redis = RedisContainer::start().await.expect("Failed to start redis");
    let cache = RedisForecastCache::connect(redis.url()).await.unwrap();

    let fp = Fingerprint::from_hex("cd".repeat(32));
    assert!(cache.get(&fp).await.unwrap().is_none());
}

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    revcast_tests::init_test_logging();
    let redis = RedisContainer::start().await.expect("Failed to start redis");
    let cache = RedisForecastCache::connect(redis.url()).await.unwrap();

    let fp = Fingerprint::from_hex("ef".repeat(32));
    cache
        .put(&fp, &forecast(&fp), Duration::from_secs(1))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(cache.get(&fp).await.unwrap().is_none());
}
