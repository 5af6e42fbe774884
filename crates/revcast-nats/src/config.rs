//! Configuration for the NATS dispatch channel.

use std::time::Duration;

/// Configuration for the NATS dispatch channel.
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs (comma-joined for cluster connects).
    pub urls: Vec<String>,
    /// Connection timeout.
    pub connection_timeout: Duration,
    /// How long a computation request may wait for a worker reply.
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            urls: vec!["nats://localhost:4222".to_string()],
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl NatsConfig {
    /// Create a new config with a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            ..Default::default()
        }
    }

    /// Set multiple server URLs for cluster support.
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    /// Set the reply timeout for computation requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}
