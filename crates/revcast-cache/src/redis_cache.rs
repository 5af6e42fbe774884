//! Redis-backed forecast cache.

use crate::keys::forecast_key;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use revcast_core::forecast::Forecast;
use revcast_core::ports::ForecastCache;
use revcast_core::{Error, Fingerprint, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Redis-backed forecast cache using a multiplexed connection manager.
///
/// The connection manager reconnects in the background; individual
/// commands fail while the server is unreachable and callers degrade to
/// the durable store.
#[derive(Clone)]
pub struct RedisForecastCache {
    conn: ConnectionManager,
}

impl RedisForecastCache {
    /// Connect to a Redis server.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis at {}", url);

        let client = redis::Client::open(url)
            .map_err(|e| Error::Cache(format!("Invalid Redis URL: {}", e)))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::Cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl ForecastCache for RedisForecastCache {
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>> {
        let key = forecast_key(fingerprint);
        let mut conn = self.conn.clone();

        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| Error::Cache(format!("GET {} failed: {}", key, e)))?;

        match value {
            Some(json) => {
                let forecast: Forecast = serde_json::from_str(&json)
                    .map_err(|e| Error::Cache(format!("Corrupt cache entry {}: {}", key, e)))?;
                debug!(fingerprint = %fingerprint, "Cache hit");
                Ok(Some(forecast))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        fingerprint: &Fingerprint,
        forecast: &Forecast,
        ttl: Duration,
    ) -> Result<()> {
        let key = forecast_key(fingerprint);
        let json = serde_json::to_string(forecast)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(&key, json, ttl.as_secs())
            .await
            .map_err(|e| Error::Cache(format!("SETEX {} failed: {}", key, e)))?;

        debug!(fingerprint = %fingerprint, ttl_secs = ttl.as_secs(), "Cache write");
        Ok(())
    }
}
