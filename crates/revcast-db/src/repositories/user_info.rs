//! PostgreSQL implementation of UserInfoRepository.

use async_trait::async_trait;
use revcast_core::forecast::ForecastType;
use revcast_core::ids::{ForecastId, UserInfoId};
use revcast_core::ports::UserInfoRepository;
use revcast_core::user_info::{NewUserInfo, ProductProfile, UserInfo};
use revcast_core::{Error, Result};
use sqlx::{PgPool, Row};

/// PostgreSQL implementation of UserInfoRepository.
pub struct PgUserInfoRepository {
    pool: PgPool,
}

impl PgUserInfoRepository {
    /// Create a new PgUserInfoRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn forecast_type_to_str(forecast_type: ForecastType) -> &'static str {
        match forecast_type {
            ForecastType::Simple => "simple",
            ForecastType::Complex => "complex",
        }
    }

    pub(crate) fn str_to_forecast_type(s: &str) -> ForecastType {
        match s {
            "complex" => ForecastType::Complex,
            _ => ForecastType::Simple,
        }
    }

    fn row_to_user_info(&self, r: &sqlx::postgres::PgRow) -> Result<UserInfo> {
        let forecast_type: String = r.get("forecast_type");

        Ok(UserInfo {
            id: UserInfoId::from_uuid(r.get::<uuid::Uuid, _>("id")),
            forecast_type: Self::str_to_forecast_type(&forecast_type),
            profile: ProductProfile {
                product_name: r.get("product_name"),
                genres: r.get("genres"),
                monetization: r.get("monetization"),
                platforms: r.get("platforms"),
                regions: r.get("regions"),
            },
            company_name: r.get("company_name"),
            email: r.get("email"),
            forecast_id: r
                .get::<Option<uuid::Uuid>, _>("forecast_id")
                .map(ForecastId::from_uuid),
            created_at: r.get("created_at"),
        })
    }
}

#[async_trait]
impl UserInfoRepository for PgUserInfoRepository {
    async fn create(&self, record: &NewUserInfo) -> Result<UserInfo> {
        let id = UserInfoId::new();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"INSERT INTO user_infos (id, forecast_type, product_name, genres, monetization, platforms, regions, company_name, email, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
        )
        .bind(id.as_uuid())
        .bind(Self::forecast_type_to_str(record.forecast_type))
        .bind(&record.profile.product_name)
        .bind(&record.profile.genres)
        .bind(&record.profile.monetization)
        .bind(&record.profile.platforms)
        .bind(&record.profile.regions)
        .bind(&record.company_name)
        .bind(&record.email)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        Ok(UserInfo {
            id,
            forecast_type: record.forecast_type,
            profile: record.profile.clone(),
            company_name: record.company_name.clone(),
            email: record.email.clone(),
            forecast_id: None,
            created_at: now,
        })
    }

    async fn get(&self, id: UserInfoId) -> Result<Option<UserInfo>> {
        let row = sqlx::query(
            "SELECT id, forecast_type, product_name, genres, monetization, platforms, regions, company_name, email, forecast_id, created_at FROM user_infos WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(self.row_to_user_info(&r)?)),
            None => Ok(None),
        }
    }

    async fn attach_forecast(
        &self,
        user_info_id: UserInfoId,
        forecast_id: ForecastId,
    ) -> Result<()> {
        // No-op when the same forecast is already attached; a linked record
        // never changes its forecast id.
        let result = sqlx::query(
            "UPDATE user_infos SET forecast_id = $2 WHERE id = $1 AND (forecast_id IS NULL OR forecast_id = $2)",
        )
        .bind(user_info_id.as_uuid())
        .bind(forecast_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let row = sqlx::query("SELECT forecast_id FROM user_infos WHERE id = $1")
            .bind(user_info_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;

        match row {
            None => Err(Error::UserInfoNotFound(user_info_id)),
            Some(r) => {
                let existing = r
                    .get::<Option<uuid::Uuid>, _>("forecast_id")
                    .map(ForecastId::from_uuid);
                match existing {
                    // Lost a race against a writer attaching the same id.
                    Some(existing) if existing == forecast_id => Ok(()),
                    Some(existing) => Err(Error::ForecastConflict {
                        user_info_id,
                        existing,
                        requested: forecast_id,
                    }),
                    None => Err(Error::Internal(format!(
                        "attach_forecast updated no rows for unlinked user info {}",
                        user_info_id
                    ))),
                }
            }
        }
    }
}
