//! Worker-side subscription to the compute subject.

use crate::channel::DispatchChannel;
use crate::metrics::DispatchMetrics;
use async_nats::Subject;
use futures::StreamExt;
use revcast_core::messages::{ComputeReply, ComputeRequest, COMPUTE_QUEUE_GROUP, COMPUTE_SUBJECT};
use revcast_core::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Queue-group subscription yielding computation requests.
///
/// All listeners share one queue group, so each request is delivered to
/// exactly one worker process.
pub struct ComputeListener {
    client: async_nats::Client,
    subscriber: async_nats::Subscriber,
    metrics: Arc<DispatchMetrics>,
}

impl ComputeListener {
    /// Subscribe to the compute subject.
    pub async fn subscribe(channel: &DispatchChannel) -> Result<Self> {
        let subscriber = channel
            .client()
            .queue_subscribe(COMPUTE_SUBJECT, COMPUTE_QUEUE_GROUP.to_string())
            .await
            .map_err(|e| {
                Error::DispatchUnavailable(format!(
                    "Failed to subscribe on {}: {}",
                    COMPUTE_SUBJECT, e
                ))
            })?;

        debug!(
            subject = COMPUTE_SUBJECT,
            group = COMPUTE_QUEUE_GROUP,
            "Compute listener subscribed"
        );

        Ok(Self {
            client: channel.client().clone(),
            subscriber,
            metrics: channel.metrics().clone(),
        })
    }

    /// Await the next computation request.
    ///
    /// Malformed payloads are logged and skipped; the stream ends when the
    /// connection is drained.
    pub async fn next(&mut self) -> Option<IncomingCompute> {
        while let Some(message) = self.subscriber.next().await {
            self.metrics.record_consumed();

            match serde_json::from_slice::<ComputeRequest>(&message.payload) {
                Ok(request) => {
                    return Some(IncomingCompute {
                        request,
                        reply_to: message.reply,
                        client: self.client.clone(),
                        metrics: self.metrics.clone(),
                    });
                }
                Err(e) => {
                    warn!("Discarding malformed compute request: {}", e);
                }
            }
        }
        None
    }
}

/// A computation request awaiting a reply.
pub struct IncomingCompute {
    pub request: ComputeRequest,
    reply_to: Option<Subject>,
    client: async_nats::Client,
    metrics: Arc<DispatchMetrics>,
}

impl IncomingCompute {
    /// Send the reply back to the requester.
    ///
    /// A request whose requester has gone away carries no reply subject;
    /// the computed forecast is already persisted by then, so the reply is
    /// simply dropped.
    pub async fn respond(&self, reply: &ComputeReply) -> Result<()> {
        let Some(reply_to) = self.reply_to.clone() else {
            debug!(
                user_info_id = %self.request.user_info_id,
                "No reply subject on compute request, skipping reply"
            );
            return Ok(());
        };

        let payload = serde_json::to_vec(reply).map_err(|e| Error::Serialization(e.to_string()))?;

        self.client
            .publish(reply_to, payload.into())
            .await
            .map_err(|e| Error::DispatchUnavailable(format!("Failed to publish reply: {}", e)))?;

        self.metrics.record_reply_sent();
        Ok(())
    }
}
