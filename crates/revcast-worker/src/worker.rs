//! The compute worker loop.

use crate::model::ForecastModel;
use chrono::Utc;
use revcast_core::forecast::Forecast;
use revcast_core::ids::ForecastId;
use revcast_core::messages::{ComputeReply, ComputeRequest};
use revcast_core::ports::ForecastRepository;
use revcast_core::Result;
use revcast_nats::ComputeListener;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Consumes computation requests and persists canonical forecasts.
///
/// Once a request has been received, the worker computes and persists
/// regardless of whether the requester is still waiting; the reply is
/// best-effort. This keeps cache and store consistent for future callers
/// even when the original caller disconnected mid-dispatch.
pub struct ComputeWorker {
    forecasts: Arc<dyn ForecastRepository>,
    model: Arc<dyn ForecastModel>,
}

impl ComputeWorker {
    pub fn new(forecasts: Arc<dyn ForecastRepository>, model: Arc<dyn ForecastModel>) -> Self {
        Self { forecasts, model }
    }

    /// Run until the subscription is drained.
    pub async fn run(&self, mut listener: ComputeListener) {
        info!("Compute worker started");

        while let Some(incoming) = listener.next().await {
            let reply = self.handle(&incoming.request).await;
            if let Err(e) = incoming.respond(&reply).await {
                warn!(
                    user_info_id = %incoming.request.user_info_id,
                    "Failed to send compute reply: {}", e
                );
            }
        }

        info!("Compute listener drained, worker stopping");
    }

    /// Handle a single computation request.
    pub async fn handle(&self, request: &ComputeRequest) -> ComputeReply {
        match self.compute_and_persist(request).await {
            Ok(forecast) => ComputeReply::Completed { forecast },
            Err(e) => {
                error!(
                    user_info_id = %request.user_info_id,
                    fingerprint = %request.fingerprint,
                    "Computation failed: {}", e
                );
                ComputeReply::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn compute_and_persist(&self, request: &ComputeRequest) -> Result<Forecast> {
        let projection = self.model.project(request).await?;

        let forecast = Forecast {
            id: ForecastId::new(),
            forecast_type: request.forecast_type,
            fingerprint: request.fingerprint.clone(),
            projection,
            created_at: Utc::now(),
        };

        let canonical = self.forecasts.insert_canonical(&forecast).await?;
        if canonical.id != forecast.id {
            // Another worker computed the same fingerprint first; the store
            // arbitrated and everyone converges to its row.
            debug!(
                fingerprint = %request.fingerprint,
                canonical_id = %canonical.id,
                "Lost insert race, returning canonical forecast"
            );
        }

        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaselineModel;
    use async_trait::async_trait;
    use revcast_core::fingerprint::Fingerprint;
    use revcast_core::forecast::ForecastType;
    use revcast_core::ids::UserInfoId;
    use revcast_core::user_info::ProductProfile;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingForecastRepository {
        by_fingerprint: Mutex<HashMap<String, Forecast>>,
    }

    #[async_trait]
    impl ForecastRepository for RecordingForecastRepository {
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

    fn request() -> ComputeRequest {
        let profile = ProductProfile {
            product_name: "Game A".to_string(),
            genres: vec!["RPG".to_string()],
            monetization: "F2P".to_string(),
            platforms: vec!["PC".to_string()],
            regions: vec!["NA".to_string()],
        };
        ComputeRequest {
            user_info_id: UserInfoId::new(),
            forecast_type: ForecastType::Simple,
            fingerprint: Fingerprint::of(&profile).unwrap(),
            profile,
            requested_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_handle_persists_and_replies() {
        let repo = Arc::new(RecordingForecastRepository::default());
        let worker = ComputeWorker::new(repo.clone(), Arc::new(BaselineModel::new()));
        let req = request();

        let reply = worker.handle(&req).await;

        let forecast = match reply {
            ComputeReply::Completed { forecast } => forecast,
            ComputeReply::Failed { message } => panic!("unexpected failure: {}", message),
        };
        let stored = repo
            .get_by_fingerprint(&req.fingerprint)
            .await
            .unwrap()
            .expect("forecast persisted");
        assert_eq!(stored.id, forecast.id);
    }

    #[tokio::test]
    async fn test_duplicate_requests_converge_on_one_forecast() {
        let repo = Arc::new(RecordingForecastRepository::default());
        let worker = ComputeWorker::new(repo, Arc::new(BaselineModel::new()));
        let req = request();

        let first = worker.handle(&req).await;
        let second = worker.handle(&req).await;

        match (first, second) {
            (
                ComputeReply::Completed { forecast: a },
                ComputeReply::Completed { forecast: b },
            ) => assert_eq!(a.id, b.id),
            _ => panic!("expected two completed replies"),
        }
    }
}
