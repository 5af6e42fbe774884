//! PostgreSQL implementation of ForecastRepository.

use async_trait::async_trait;
use revcast_core::fingerprint::Fingerprint;
use revcast_core::forecast::{Forecast, ProjectionPoint};
use revcast_core::ids::ForecastId;
use revcast_core::ports::ForecastRepository;
use revcast_core::{Error, Result};
use sqlx::{PgPool, Row};

use super::user_info::PgUserInfoRepository;

/// PostgreSQL implementation of ForecastRepository.
pub struct PgForecastRepository {
    pool: PgPool,
}

impl PgForecastRepository {
    /// Create a new PgForecastRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_forecast(&self, r: &sqlx::postgres::PgRow) -> Result<Forecast> {
        let forecast_type: String = r.get("forecast_type");
        let projection: Vec<ProjectionPoint> = serde_json::from_value(r.get("projection"))
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Forecast {
            id: ForecastId::from_uuid(r.get::<uuid::Uuid, _>("id")),
            forecast_type: PgUserInfoRepository::str_to_forecast_type(&forecast_type),
            fingerprint: Fingerprint::from_hex(r.get::<String, _>("fingerprint")),
            projection,
            created_at: r.get("created_at"),
        })
    }
}

#[async_trait]
impl ForecastRepository for PgForecastRepository {
    async fn insert_canonical(&self, forecast: &Forecast) -> Result<Forecast> {
        let projection = serde_json::to_value(&forecast.projection)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        // The unique fingerprint index arbitrates concurrent computations:
        // the first insert wins, later ones fall through to the re-read.
        sqlx::query(
            r#"INSERT INTO forecasts (id, forecast_type, fingerprint, projection, created_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (fingerprint) DO NOTHING"#,
        )
        .bind(forecast.id.as_uuid())
        .bind(PgUserInfoRepository::forecast_type_to_str(
            forecast.forecast_type,
        ))
        .bind(forecast.fingerprint.as_str())
        .bind(&projection)
        .bind(forecast.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        match self.get_by_fingerprint(&forecast.fingerprint).await? {
            Some(canonical) => Ok(canonical),
            None => Err(Error::Internal(format!(
                "no canonical forecast found after insert for fingerprint {}",
                forecast.fingerprint
            ))),
        }
    }

    async fn get(&self, id: ForecastId) -> Result<Option<Forecast>> {
        let row = sqlx::query(
            "SELECT id, forecast_type, fingerprint, projection, created_at FROM forecasts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(self.row_to_forecast(&r)?)),
            None => Ok(None),
        }
    }

    async fn get_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<Option<Forecast>> {
        let row = sqlx::query(
            "SELECT id, forecast_type, fingerprint, projection, created_at FROM forecasts WHERE fingerprint = $1",
        )
        .bind(fingerprint.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(self.row_to_forecast(&r)?)),
            None => Ok(None),
        }
    }
}
