//! Command implementations: process wiring and lifecycle.

use crate::config::{AppConfig, CacheBackend};
use revcast_api::{build_app, AppState};
use revcast_cache::{MemoryForecastCache, RedisForecastCache};
use revcast_core::ports::ForecastCache;
use revcast_db::{Database, PgForecastRepository, PgUserInfoRepository};
use revcast_nats::{ComputeListener, DispatchChannel, NatsConfig, NatsDispatcher};
use revcast_orchestrator::ForecastOrchestrator;
use revcast_worker::{BaselineModel, ComputeWorker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Start the HTTP API server.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database.url).await?;
    let channel = DispatchChannel::connect(nats_config(&config)).await?;
    let cache = build_cache(&config).await?;

    let orchestrator = Arc::new(
        ForecastOrchestrator::new(
            Arc::new(PgUserInfoRepository::new(db.pool().clone())),
            Arc::new(PgForecastRepository::new(db.pool().clone())),
            cache,
            Arc::new(NatsDispatcher::new(channel.clone())),
        )
        .with_cache_ttl(Duration::from_secs(config.cache.ttl_secs)),
    );

    let state = Arc::new(AppState::new(orchestrator));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    info!("API server listening on {}", config.server.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    channel.shutdown().await?;
    Ok(())
}

/// Start a forecast compute worker.
pub async fn worker(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database.url).await?;
    let channel = DispatchChannel::connect(nats_config(&config)).await?;
    let listener = ComputeListener::subscribe(&channel).await?;

    let worker = ComputeWorker::new(
        Arc::new(PgForecastRepository::new(db.pool().clone())),
        Arc::new(BaselineModel::new()),
    );

    let handle = tokio::spawn(async move { worker.run(listener).await });

    shutdown_signal().await;
    info!("Shutdown signal received");

    // Draining the connection ends the listener stream, which stops the loop.
    channel.shutdown().await?;
    handle.await?;
    Ok(())
}

/// Run pending database migrations.
pub async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database.url).await?;
    db.migrate().await?;
    info!("Migrations applied");
    Ok(())
}

fn nats_config(config: &AppConfig) -> NatsConfig {
    NatsConfig::default()
        .with_urls(config.nats.urls.clone())
        .with_request_timeout(Duration::from_secs(config.nats.request_timeout_secs))
}

async fn build_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn ForecastCache>> {
    match config.cache.backend {
        CacheBackend::Redis => Ok(Arc::new(
            RedisForecastCache::connect(&config.cache.redis_url).await?,
        )),
        CacheBackend::Memory => Ok(Arc::new(MemoryForecastCache::with_config(
            10_000,
            config.cache.ttl_secs,
        ))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
}
