//! Dispatch channel integration tests against a real NATS server.
//!
//! Run with: `cargo test -p revcast-tests --test dispatch_tests --features integration`

#![cfg(feature = "integration")]

use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::ForecastType;
use revcast_core::ids::UserInfoId;
use revcast_core::messages::{ComputeReply, ComputeRequest};
use revcast_core::ports::ComputeDispatcher;
use revcast_nats::{ComputeListener, DispatchChannel, NatsConfig, NatsDispatcher};
use revcast_tests::containers::NatsContainer;
use revcast_tests::{InMemoryForecastRepository, SubmissionFixture};
use revcast_worker::{BaselineModel, ComputeWorker};
use std::sync::Arc;
use std::time::Duration;

fn request() -> ComputeRequest {
    let profile = SubmissionFixture::game_a();
    ComputeRequest {
        user_info_id: UserInfoId::new(),
        forecast_type: ForecastType::Simple,
        fingerprint: Fingerprint::of(&profile).unwrap(),
        profile,
        requested_at: chrono::Utc::now(),
    }
}

async fn start_worker(
    channel: &DispatchChannel,
    forecasts: Arc<InMemoryForecastRepository>,
) -> tokio::task::JoinHandle<()> {
    let listener = ComputeListener::subscribe(channel)
        .await
        .expect("Failed to subscribe");
    let worker = ComputeWorker::new(forecasts, Arc::new(BaselineModel::new()));
    tokio::spawn(async move { worker.run(listener).await })
}

#[tokio::test]
async fn test_request_reply_roundtrip() {
    revcast_tests::init_test_logging();
    let nats = NatsContainer::start().await.expect("Failed to start NATS");

    let channel = DispatchChannel::connect(NatsConfig::new(nats.url()))
        .await
        .expect("Failed to connect");

    let forecasts = Arc::new(InMemoryForecastRepository::new());
    let _worker = start_worker(&channel, forecasts.clone()).await;

    let dispatcher = NatsDispatcher::new(channel.clone());
    let reply = dispatcher.request_computation(request()).await.unwrap();

    match reply {
        ComputeReply::Completed { forecast } => {
            assert_eq!(forecast.projection.len(), 12);
            // The worker persisted before replying.
            assert_eq!(forecasts.len().await, 1);
        }
        ComputeReply::Failed { message } => panic!("unexpected failure: {}", message),
    }

    let metrics = channel.metrics().snapshot();
    assert_eq!(metrics.requests_sent, 1);
    assert_eq!(metrics.replies_received, 1);
}

#[tokio::test]
async fn test_duplicate_requests_share_one_canonical_forecast() {
    revcast_tests::init_test_logging();
    let nats = NatsContainer::start().await.expect("Failed to start NATS");

    let channel = DispatchChannel::connect(NatsConfig::new(nats.url()))
        .await
        .expect("Failed to connect");

    let forecasts = Arc::new(InMemoryForecastRepository::new());
    let _worker = start_worker(&channel, forecasts.clone()).await;

    let dispatcher = NatsDispatcher::new(channel.clone());
    let (a, b) = tokio::join!(
        dispatcher.request_computation(request()),
        dispatcher.request_computation(request()),
    );

    let id_of = |reply: ComputeReply| match reply {
        ComputeReply::Completed { forecast } => forecast.id,
        ComputeReply::Failed { message } => panic!("unexpected failure: {}", message),
    };

    assert_eq!(id_of(a.unwrap()), id_of(b.unwrap()));
    assert_eq!(forecasts.len().await, 1);
}

#[tokio::test]
async fn test_request_without_workers_times_out_as_unavailable() {
    revcast_tests::init_test_logging();
    let nats = NatsContainer::start().await.expect("Failed to start NATS");

    let config = NatsConfig::new(nats.url()).with_request_timeout(Duration::from_millis(500));
    let channel = DispatchChannel::connect(config)
        .await
        .expect("Failed to connect");

    let dispatcher = NatsDispatcher::new(channel);
    let result = dispatcher.request_computation(request()).await;

    assert!(matches!(
        result,
        Err(revcast_core::Error::DispatchUnavailable(_))
    ));
}
