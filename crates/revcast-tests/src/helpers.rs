//! Test helper functions and utilities.

use crate::fakes::{
    FakeForecastCache, InMemoryForecastRepository, InMemoryUserInfoRepository,
    WorkerBackedDispatcher,
};
use revcast_api::{build_app, AppState};
use revcast_orchestrator::ForecastOrchestrator;
use revcast_worker::{BaselineModel, ComputeWorker};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Fully faked orchestration stack with handles to every collaborator.
pub struct TestHarness {
    pub orchestrator: Arc<ForecastOrchestrator>,
    pub user_infos: Arc<InMemoryUserInfoRepository>,
    pub forecasts: Arc<InMemoryForecastRepository>,
    pub cache: Arc<FakeForecastCache>,
    pub dispatcher: Arc<WorkerBackedDispatcher>,
}

impl TestHarness {
    /// Harness with a working cache.
    pub fn new() -> Self {
        Self::with_cache(FakeForecastCache::new())
    }

    /// Harness with a custom cache fake.
    pub fn with_cache(cache: FakeForecastCache) -> Self {
        crate::init_test_logging();

        let user_infos = Arc::new(InMemoryUserInfoRepository::new());
        let forecasts = Arc::new(InMemoryForecastRepository::new());
        let cache = Arc::new(cache);

        let worker = ComputeWorker::new(forecasts.clone(), Arc::new(BaselineModel::new()));
        let dispatcher = Arc::new(WorkerBackedDispatcher::new(worker));

        let orchestrator = Arc::new(ForecastOrchestrator::new(
            user_infos.clone(),
            forecasts.clone(),
            cache.clone(),
            dispatcher.clone(),
        ));

        Self {
            orchestrator,
            user_infos,
            forecasts,
            cache,
            dispatcher,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Start an API server over a faked stack and return its address.
pub async fn start_test_server(
    harness: &TestHarness,
) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let state = Arc::new(AppState::new(harness.orchestrator.clone()));
    let app = build_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    Ok((addr, handle))
}

/// Create an HTTP client for testing.
pub fn test_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create test client")
}

/// API test client with base URL.
pub struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            client: test_client(),
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    /// Check health endpoint.
    pub async fn health(&self) -> anyhow::Result<bool> {
        let resp = self.get("/health").await?;
        Ok(resp.status().is_success())
    }
}
