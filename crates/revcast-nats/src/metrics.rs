//! Metrics for dispatch channel observability.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the NATS dispatch channel.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Total computation requests sent.
    pub requests_sent: AtomicU64,
    /// Total worker replies received.
    pub replies_received: AtomicU64,
    /// Total request failures (channel down or reply timeout).
    pub request_failures: AtomicU64,
    /// Total requests consumed on the worker side.
    pub requests_consumed: AtomicU64,
    /// Total replies sent from the worker side.
    pub replies_sent: AtomicU64,
    /// Current connection state (0 = disconnected, 1 = connected).
    pub connected: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a request sent towards the workers.
    pub fn record_request(&self) {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reply received from a worker.
    pub fn record_reply(&self) {
        self.replies_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request failure.
    pub fn record_request_failure(&self) {
        self.request_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request consumed by a worker.
    pub fn record_consumed(&self) {
        self.requests_consumed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reply published by a worker.
    pub fn record_reply_sent(&self) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Set connection state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected as u64, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            replies_received: self.replies_received.load(Ordering::Relaxed),
            request_failures: self.request_failures.load(Ordering::Relaxed),
            requests_consumed: self.requests_consumed.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            connected: self.connected.load(Ordering::Relaxed) == 1,
        }
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub requests_sent: u64,
    pub replies_received: u64,
    pub request_failures: u64,
    pub requests_consumed: u64,
    pub replies_sent: u64,
    pub connected: bool,
}
