//! Health check for the NATS dispatch channel.

use crate::metrics::DispatchMetrics;
use std::sync::Arc;

/// Health status of the dispatch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Healthy and connected.
    Healthy,
    /// Degraded but functional.
    Degraded { reason: String },
    /// Unhealthy and not connected.
    Unhealthy { reason: String },
}

impl HealthStatus {
    /// Check if the status is healthy.
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Check if the channel is operational (healthy or degraded).
    pub fn is_operational(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded { .. })
    }
}

/// Health check result with details.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub connected: bool,
    pub requests_sent: u64,
    pub replies_received: u64,
    pub request_failures: u64,
}

impl HealthCheck {
    /// Create a health check from metrics.
    pub fn from_metrics(metrics: &Arc<DispatchMetrics>, connected: bool) -> Self {
        let snapshot = metrics.snapshot();

        let status = if connected {
            if snapshot.request_failures > 0 {
                HealthStatus::Degraded {
                    reason: format!("{} request failures recorded", snapshot.request_failures),
                }
            } else {
                HealthStatus::Healthy
            }
        } else {
            HealthStatus::Unhealthy {
                reason: "Not connected to NATS".to_string(),
            }
        };

        Self {
            status,
            connected,
            requests_sent: snapshot.requests_sent,
            replies_received: snapshot.replies_received,
            request_failures: snapshot.request_failures,
        }
    }
}
