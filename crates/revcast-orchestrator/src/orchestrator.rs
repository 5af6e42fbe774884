//! The coordinating component of the forecast pipeline.

use chrono::Utc;
use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::Forecast;
use revcast_core::ids::ForecastId;
use revcast_core::messages::{ComputeReply, ComputeRequest};
use revcast_core::ports::{ComputeDispatcher, ForecastCache, ForecastRepository, UserInfoRepository};
use revcast_core::user_info::{NewUserInfo, UserInfo};
use revcast_core::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default time-to-live for cache entries (24 hours).
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Where the returned forecast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    Cache,
    Store,
    Computed,
}

/// Outcome of a submission: the persisted record and its forecast.
#[derive(Debug, Clone)]
pub struct Submission {
    pub user_info: UserInfo,
    pub forecast: Forecast,
    pub source: ForecastSource,
}

/// Coordinates fingerprinting, caching, persistence, and dispatch.
///
/// Forecast results are shared by fingerprint: on a cache or store hit the
/// pre-existing forecast id is attached to the newly persisted UserInfo, so
/// the record-to-forecast relation is many-to-one at the value level even
/// though each record stores a single forecast id.
///
/// No exclusive locks are taken anywhere on the hot path. Concurrent
/// submissions with one fingerprint may both dispatch; the store's
/// first-writer-wins insert makes them converge on one canonical forecast,
/// and the idempotent attach and last-writer-wins cache absorb the rest.
pub struct ForecastOrchestrator {
    user_infos: Arc<dyn UserInfoRepository>,
    forecasts: Arc<dyn ForecastRepository>,
    cache: Arc<dyn ForecastCache>,
    dispatcher: Arc<dyn ComputeDispatcher>,
    cache_ttl: Duration,
}

impl ForecastOrchestrator {
    pub fn new(
        user_infos: Arc<dyn UserInfoRepository>,
        forecasts: Arc<dyn ForecastRepository>,
        cache: Arc<dyn ForecastCache>,
        dispatcher: Arc<dyn ComputeDispatcher>,
    ) -> Self {
        Self {
            user_infos,
            forecasts,
            cache,
            dispatcher,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the cache entry time-to-live.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Submit a product record and return its forecast.
    ///
    /// The record is persisted unconditionally, even when the forecast is
    /// served from the cache, so every submission is retained for
    /// analytics. Invalid input is rejected before anything is persisted
    /// or dispatched.
    pub async fn submit(&self, record: NewUserInfo) -> Result<Submission> {
        let fingerprint = Fingerprint::of(&record.profile)?;

        let user_info = self.user_infos.create(&record).await?;
        debug!(
            user_info_id = %user_info.id,
            fingerprint = %fingerprint,
            "Submission persisted"
        );

        if let Some(forecast) = self.cached_forecast(&fingerprint).await {
            return self
                .link(user_info, forecast, ForecastSource::Cache)
                .await;
        }

        // The cache is advisory; the store may still hold a canonical
        // forecast for this fingerprint (eviction, cold cache, restart).
        if let Some(forecast) = self.forecasts.get_by_fingerprint(&fingerprint).await? {
            self.warm_cache(&fingerprint, &forecast).await;
            return self
                .link(user_info, forecast, ForecastSource::Store)
                .await;
        }

        let request = ComputeRequest {
            user_info_id: user_info.id,
            forecast_type: user_info.forecast_type,
            fingerprint: fingerprint.clone(),
            profile: user_info.profile.clone(),
            requested_at: Utc::now(),
        };

        let forecast = match self.dispatcher.request_computation(request).await? {
            ComputeReply::Completed { forecast } => forecast,
            ComputeReply::Failed { message } => return Err(Error::ComputeFailed(message)),
        };

        self.warm_cache(&fingerprint, &forecast).await;
        self.link(user_info, forecast, ForecastSource::Computed).await
    }

    /// Look up a forecast by id in the durable store.
    pub async fn forecast_by_id(&self, id: ForecastId) -> Result<Forecast> {
        self.forecasts
            .get(id)
            .await?
            .ok_or(Error::ForecastNotFound(id))
    }

    async fn link(
        &self,
        mut user_info: UserInfo,
        forecast: Forecast,
        source: ForecastSource,
    ) -> Result<Submission> {
        self.user_infos
            .attach_forecast(user_info.id, forecast.id)
            .await?;
        user_info.forecast_id = Some(forecast.id);

        info!(
            user_info_id = %user_info.id,
            forecast_id = %forecast.id,
            source = ?source,
            "Forecast linked"
        );

        Ok(Submission {
            user_info,
            forecast,
            source,
        })
    }

    /// Cache reads degrade to a miss; failures never reach the caller.
    async fn cached_forecast(&self, fingerprint: &Fingerprint) -> Option<Forecast> {
        match self.cache.get(fingerprint).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(
                    fingerprint = %fingerprint,
                    "Cache read failed, falling back to store: {}", e
                );
                None
            }
        }
    }

    /// Best-effort cache write; last writer wins.
    async fn warm_cache(&self, fingerprint: &Fingerprint, forecast: &Forecast) {
        if let Err(e) = self.cache.put(fingerprint, forecast, self.cache_ttl).await {
            warn!(
                fingerprint = %fingerprint,
                "Cache write failed: {}", e
            );
        }
    }
}
