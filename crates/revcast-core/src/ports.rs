//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and external
//! adapters. The orchestrator only ever sees these seams; concrete Redis,
//! Postgres, and NATS adapters live in their own crates.

use crate::fingerprint::Fingerprint;
use crate::forecast::Forecast;
use crate::ids::{ForecastId, UserInfoId};
use crate::messages::{ComputeReply, ComputeRequest};
use crate::user_info::{NewUserInfo, UserInfo};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Repository for submitted product records.
#[async_trait]
pub trait UserInfoRepository: Send + Sync {
    /// Persist a new submission, assigning its identity.
    async fn create(&self, record: &NewUserInfo) -> Result<UserInfo>;

    /// Get a submission by id.
    async fn get(&self, id: UserInfoId) -> Result<Option<UserInfo>>;

    /// Attach a computed forecast to a submission.
    ///
    /// Idempotent: attaching the same forecast id twice is a no-op.
    /// Attaching a different id to an already-linked record fails with
    /// [`crate::Error::ForecastConflict`].
    async fn attach_forecast(
        &self,
        user_info_id: UserInfoId,
        forecast_id: ForecastId,
    ) -> Result<()>;
}

/// Repository for computed forecasts.
#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// Persist a forecast, keeping the first writer per fingerprint.
    ///
    /// Returns the canonical row: the given forecast if it won, or the
    /// previously persisted forecast for the same fingerprint.
    async fn insert_canonical(&self, forecast: &Forecast) -> Result<Forecast>;

    /// Get a forecast by id.
    async fn get(&self, id: ForecastId) -> Result<Option<Forecast>>;

    /// Get the canonical forecast for a fingerprint, if any.
    async fn get_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>>;
}

/// Fast key-value cache mapping fingerprints to forecasts.
///
/// Advisory, not authoritative: `get` may miss for values previously
/// written, and `put` is best-effort. Callers fall back to the durable
/// store on any miss or cache error.
#[async_trait]
pub trait ForecastCache: Send + Sync {
    /// Side-effect-free read.
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>>;

    /// Best-effort write with a time-to-live.
    async fn put(
        &self,
        fingerprint: &Fingerprint,
        forecast: &Forecast,
        ttl: Duration,
    ) -> Result<()>;
}

/// Dispatch channel to the decoupled compute workers.
#[async_trait]
pub trait ComputeDispatcher: Send + Sync {
    /// Publish a computation request and await the worker's reply.
    ///
    /// Fails with [`crate::Error::DispatchUnavailable`] when the channel is
    /// unreachable; nothing is persisted in that case.
    async fn request_computation(&self, request: ComputeRequest) -> Result<ComputeReply>;
}
