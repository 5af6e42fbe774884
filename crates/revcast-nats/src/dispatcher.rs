//! Request/reply dispatcher towards the compute workers.

use crate::channel::DispatchChannel;
use async_trait::async_trait;
use revcast_core::messages::{ComputeReply, ComputeRequest, COMPUTE_SUBJECT};
use revcast_core::ports::ComputeDispatcher;
use revcast_core::{Error, Result};
use tracing::debug;

/// NATS-backed implementation of [`ComputeDispatcher`].
///
/// A request that finds no worker within the configured reply timeout
/// fails with `DispatchUnavailable`; the worker that eventually receives
/// it still completes and persists, so the store converges for later
/// callers.
#[derive(Clone)]
pub struct NatsDispatcher {
    channel: DispatchChannel,
}

impl NatsDispatcher {
    pub fn new(channel: DispatchChannel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ComputeDispatcher for NatsDispatcher {
    async fn request_computation(&self, request: ComputeRequest) -> Result<ComputeReply> {
        let payload =
            serde_json::to_vec(&request).map_err(|e| Error::Serialization(e.to_string()))?;

        debug!(
            user_info_id = %request.user_info_id,
            fingerprint = %request.fingerprint,
            "Dispatching computation request"
        );
        self.channel.metrics().record_request();

        let message = self
            .channel
            .client()
            .request(COMPUTE_SUBJECT, payload.into())
            .await
            .map_err(|e| {
                self.channel.metrics().record_request_failure();
                Error::DispatchUnavailable(format!(
                    "Request on {} failed: {}",
                    COMPUTE_SUBJECT, e
                ))
            })?;

        self.channel.metrics().record_reply();

        serde_json::from_slice(&message.payload).map_err(|e| Error::Serialization(e.to_string()))
    }
}
