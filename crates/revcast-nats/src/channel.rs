//! NATS connection handling for the dispatch channel.

use crate::config::NatsConfig;
use crate::health::HealthCheck;
use crate::metrics::DispatchMetrics;
use revcast_core::{Error, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Shared NATS connection used by both the dispatcher and the workers.
#[derive(Clone)]
pub struct DispatchChannel {
    client: async_nats::Client,
    config: NatsConfig,
    metrics: Arc<DispatchMetrics>,
}

impl DispatchChannel {
    /// Connect to NATS.
    pub async fn connect(config: NatsConfig) -> Result<Self> {
        let urls = config.urls.join(",");
        info!("Connecting to NATS at {}", urls);

        let metrics = DispatchMetrics::new();

        let client = async_nats::ConnectOptions::new()
            .connection_timeout(config.connection_timeout)
            .request_timeout(Some(config.request_timeout))
            .retry_on_initial_connect()
            .connect(&urls)
            .await
            .map_err(|e| Error::DispatchUnavailable(format!("Failed to connect to NATS: {}", e)))?;

        metrics.set_connected(true);
        info!("Connected to NATS");

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    /// Get the underlying NATS client.
    pub fn client(&self) -> &async_nats::Client {
        &self.client
    }

    /// Get the channel configuration.
    pub fn config(&self) -> &NatsConfig {
        &self.config
    }

    /// Get metrics.
    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        self.client.connection_state() == async_nats::connection::State::Connected
    }

    /// Check connection health.
    pub fn health_check(&self) -> HealthCheck {
        HealthCheck::from_metrics(&self.metrics, self.is_connected())
    }

    /// Graceful shutdown - drain the connection.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Draining NATS connection");

        if let Err(e) = self.client.drain().await {
            error!("Error draining NATS connection: {}", e);
        }

        self.metrics.set_connected(false);
        info!("NATS connection drained");

        Ok(())
    }
}
