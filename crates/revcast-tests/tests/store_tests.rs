//! Durable store integration tests.
//!
//! Run with: `cargo test -p revcast-tests --test store_tests --features integration`

#![cfg(feature = "integration")]

use revcast_core::Error;
use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::{Forecast, ForecastType, ProjectionPoint};
use revcast_core::ids::ForecastId;
use revcast_core::ports::{ForecastRepository, UserInfoRepository};
use revcast_db::{Database, PgForecastRepository, PgUserInfoRepository};
use revcast_tests::containers::PostgresContainer;
use revcast_tests::SubmissionFixture;

async fn setup() -> (PostgresContainer, Database) {
    revcast_tests::init_test_logging();

    let postgres = PostgresContainer::start()
        .await
        .expect("Failed to start postgres");
    let db = Database::connect(postgres.connection_string())
        .await
        .expect("Failed to connect");
    db.migrate().await.expect("Failed to migrate");

    (postgres, db)
}

fn forecast(fingerprint: &Fingerprint) -> Forecast {
    Forecast {
        id: ForecastId::new(),
        forecast_type: ForecastType::Simple,
        fingerprint: fingerprint.clone(),
        projection: vec![
            ProjectionPoint {
                month: 1,
                revenue: 15_000.0,
            },
            ProjectionPoint {
                month: 2,
                revenue: 20_000.0,
            },
        ],
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_create_and_get_user_info() {
    let (_pg, db) = setup().await;
    let repo = PgUserInfoRepository::new(db.pool().clone());

    let created = repo
        .create(&SubmissionFixture::complex(SubmissionFixture::game_a()))
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap().expect("record exists");
    assert_eq!(fetched.profile, created.profile);
    assert_eq!(fetched.company_name.as_deref(), Some("Indie Studio"));
    assert!(fetched.forecast_id.is_none());
}

#[tokio::test]
async fn test_attach_forecast_idempotent_and_conflicting() {
    let (_pg, db) = setup().await;
    let users = PgUserInfoRepository::new(db.pool().clone());
    let forecasts = PgForecastRepository::new(db.pool().clone());

    let record = users
        .create(&SubmissionFixture::simple(SubmissionFixture::game_a()))
        .await
        .unwrap();

    let fp = Fingerprint::of(&SubmissionFixture::game_a()).unwrap();
    let stored = forecasts.insert_canonical(&forecast(&fp)).await.unwrap();

    // First attach links, second is a no-op.
    users.attach_forecast(record.id, stored.id).await.unwrap();
    users.attach_forecast(record.id, stored.id).await.unwrap();

    let linked = users.get(record.id).await.unwrap().unwrap();
    assert_eq!(linked.forecast_id, Some(stored.id));

    // A different forecast id must be refused.
    let fp_b = Fingerprint::of(&SubmissionFixture::game_b()).unwrap();
    let other = forecasts.insert_canonical(&forecast(&fp_b)).await.unwrap();

    let result = users.attach_forecast(record.id, other.id).await;
    assert!(matches!(result, Err(Error::ForecastConflict { .. })));
}

#[tokio::test]
async fn test_attach_to_unknown_user_info_is_not_found() {
    let (_pg, db) = setup().await;
    let users = PgUserInfoRepository::new(db.pool().clone());

    let result = users
        .attach_forecast(revcast_core::ids::UserInfoId::new(), ForecastId::new())
        .await;
    assert!(matches!(result, Err(Error::UserInfoNotFound(_))));
}

#[tokio::test]
async fn test_insert_canonical_keeps_first_writer() {
    let (_pg, db) = setup().await;
    let forecasts = PgForecastRepository::new(db.pool().clone());

    let fp = Fingerprint::of(&SubmissionFixture::game_a()).unwrap();

    let first = forecasts.insert_canonical(&forecast(&fp)).await.unwrap();
    let second = forecasts.insert_canonical(&forecast(&fp)).await.unwrap();

    assert_eq!(first.id, second.id);

    let by_fp = forecasts
        .get_by_fingerprint(&fp)
        .await
        .unwrap()
        .expect("canonical row exists");
    assert_eq!(by_fp.id, first.id);
}

#[tokio::test]
async fn test_forecast_survives_reconnect() {
    let (pg, db) = setup().await;
    let fp = Fingerprint::of(&SubmissionFixture::game_a()).unwrap();

    let stored = PgForecastRepository::new(db.pool().clone())
        .insert_canonical(&forecast(&fp))
        .await
        .unwrap();

    // A fresh pool sees the acknowledged write.
    let db2 = Database::connect(pg.connection_string()).await.unwrap();
    let fetched = PgForecastRepository::new(db2.pool().clone())
        .get(stored.id)
        .await
        .unwrap()
        .expect("forecast persisted");
    assert_eq!(fetched.projection, stored.projection);
}
