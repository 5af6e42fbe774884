//! In-memory implementations of the core ports.
//!
//! These mirror the semantics of the real adapters: the user-info fake
//! enforces idempotent attach and conflict detection like the Postgres
//! repository, the forecast fake keeps the first writer per fingerprint,
//! and the cache fake counts traffic so suites can assert hit/miss
//! behavior.

use async_trait::async_trait;
use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::Forecast;
use revcast_core::ids::{ForecastId, UserInfoId};
use revcast_core::messages::{ComputeReply, ComputeRequest};
use revcast_core::ports::{ComputeDispatcher, ForecastCache, ForecastRepository, UserInfoRepository};
use revcast_core::user_info::{NewUserInfo, UserInfo};
use revcast_core::{Error, Result};
use revcast_worker::ComputeWorker;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// In-memory UserInfoRepository with Postgres-equivalent attach semantics.
#[derive(Default)]
pub struct InMemoryUserInfoRepository {
    records: Mutex<HashMap<UserInfoId, UserInfo>>,
    fail_writes: AtomicBool,
}

impl InMemoryUserInfoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with a persistence error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail_writes.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl UserInfoRepository for InMemoryUserInfoRepository {
    async fn create(&self, record: &NewUserInfo) -> Result<UserInfo> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence("store unavailable".to_string()));
        }

        let user_info = UserInfo {
            id: UserInfoId::new(),
            forecast_type: record.forecast_type,
            profile: record.profile.clone(),
            company_name: record.company_name.clone(),
            email: record.email.clone(),
            forecast_id: None,
            created_at: chrono::Utc::now(),
        };

        self.records
            .lock()
            .await
            .insert(user_info.id, user_info.clone());
        Ok(user_info)
    }

    async fn get(&self, id: UserInfoId) -> Result<Option<UserInfo>> {
        Ok(self.records.lock().await.get(&id).cloned())
    }

    async fn attach_forecast(
        &self,
        user_info_id: UserInfoId,
        forecast_id: ForecastId,
    ) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence("store unavailable".to_string()));
        }

        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&user_info_id)
            .ok_or(Error::UserInfoNotFound(user_info_id))?;

        match record.forecast_id {
            None => {
                record.forecast_id = Some(forecast_id);
                Ok(())
            }
            Some(existing) if existing == forecast_id => Ok(()),
            Some(existing) => Err(Error::ForecastConflict {
                user_info_id,
                existing,
                requested: forecast_id,
            }),
        }
    }
}

/// In-memory ForecastRepository keeping the first writer per fingerprint.
#[derive(Default)]
pub struct InMemoryForecastRepository {
    by_fingerprint: Mutex<HashMap<String, Forecast>>,
}

impl InMemoryForecastRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.by_fingerprint.lock().await.len()
    }
}

#[async_trait]
impl ForecastRepository for InMemoryForecastRepository {
    async fn insert_canonical(&self, forecast: &Forecast) -> Result<Forecast> {
        let mut store = self.by_fingerprint.lock().await;
        Ok(store
            .entry(forecast.fingerprint.as_str().to_string())
            .or_insert_with(|| forecast.clone())
            .clone())
    }

    async fn get(&self, id: ForecastId) -> Result<Option<Forecast>> {
        let store = self.by_fingerprint.lock().await;
        Ok(store.values().find(|f| f.id == id).cloned())
    }

    async fn get_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>> {
        let store = self.by_fingerprint.lock().await;
        Ok(store.get(fingerprint.as_str()).cloned())
    }
}

/// Counting forecast cache with switchable failure modes.
#[derive(Default)]
pub struct FakeForecastCache {
    entries: Mutex<HashMap<String, Forecast>>,
    pub gets: AtomicU64,
    pub hits: AtomicU64,
    pub puts: AtomicU64,
    always_miss: AtomicBool,
    fail: AtomicBool,
}

impl FakeForecastCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that never returns a hit: simulates a cold cache or one
    /// whose contents were lost in a restart.
    pub fn always_miss() -> Self {
        let cache = Self::default();
        cache.always_miss.store(true, Ordering::SeqCst);
        cache
    }

    /// A cache whose every operation errors: simulates a partition.
    pub fn failing() -> Self {
        let cache = Self::default();
        cache.fail.store(true, Ordering::SeqCst);
        cache
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastCache for FakeForecastCache {
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>> {
        self.gets.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Cache("cache partitioned".to_string()));
        }
        if self.always_miss.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let hit = self
            .entries
            .lock()
            .await
            .get(fingerprint.as_str())
            .cloned();
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(hit)
    }

    async fn put(
        &self,
        fingerprint: &Fingerprint,
        forecast: &Forecast,
        _ttl: Duration,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Cache("cache partitioned".to_string()));
        }

        self.puts.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .await
            .insert(fingerprint.as_str().to_string(), forecast.clone());
        Ok(())
    }
}

/// Dispatcher running a real [`ComputeWorker`] in-process.
///
/// Mirrors the synchronous-over-async deployment model while counting
/// dispatches, so suites can assert that cache hits never reach the
/// workers.
pub struct WorkerBackedDispatcher {
    worker: ComputeWorker,
    pub dispatches: AtomicU64,
    unavailable: AtomicBool,
}

impl WorkerBackedDispatcher {
    pub fn new(worker: ComputeWorker) -> Self {
        Self {
            worker,
            dispatches: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate the dispatch channel being unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ComputeDispatcher for WorkerBackedDispatcher {
    async fn request_computation(&self, request: ComputeRequest) -> Result<ComputeReply> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::DispatchUnavailable(
                "dispatch channel offline".to_string(),
            ));
        }

        self.dispatches.fetch_add(1, Ordering::SeqCst);
        Ok(self.worker.handle(&request).await)
    }
}
