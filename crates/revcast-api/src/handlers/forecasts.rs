//! Forecast submission and lookup handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use revcast_core::forecast::{Forecast, ForecastType, ProjectionPoint};
use revcast_core::ids::ForecastId;
use revcast_core::user_info::{NewUserInfo, ProductProfile};
use revcast_core::Error;
use revcast_orchestrator::{ForecastSource, Submission};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleForecastRequest {
    pub product_name: String,
    pub genres: Vec<String>,
    pub monetization: String,
    pub platforms: Vec<String>,
    pub regions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexForecastRequest {
    pub product_name: String,
    pub genres: Vec<String>,
    pub monetization: String,
    pub platforms: Vec<String>,
    pub regions: Vec<String>,
    pub company_name: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub id: String,
    pub forecast_type: ForecastType,
    pub projection: Vec<ProjectionPoint>,
    pub total_revenue: f64,
    pub created_at: String,
}

impl From<&Forecast> for ForecastResponse {
    fn from(forecast: &Forecast) -> Self {
        Self {
            id: forecast.id.to_string(),
            forecast_type: forecast.forecast_type,
            projection: forecast.projection.clone(),
            total_revenue: forecast.total_revenue(),
            created_at: forecast.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub user_info_id: String,
    pub source: ForecastSource,
    #[serde(flatten)]
    pub forecast: ForecastResponse,
}

impl From<&Submission> for SubmissionResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            user_info_id: submission.user_info.id.to_string(),
            source: submission.source,
            forecast: ForecastResponse::from(&submission.forecast),
        }
    }
}

pub async fn submit_simple(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimpleForecastRequest>,
) -> Result<Json<SubmissionResponse>, (StatusCode, String)> {
    let record = NewUserInfo {
        forecast_type: ForecastType::Simple,
        profile: ProductProfile {
            product_name: request.product_name,
            genres: request.genres,
            monetization: request.monetization,
            platforms: request.platforms,
            regions: request.regions,
        },
        company_name: None,
        email: None,
    };

    let submission = state
        .orchestrator
        .submit(record)
        .await
        .map_err(error_response)?;

    Ok(Json(SubmissionResponse::from(&submission)))
}

pub async fn submit_complex(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComplexForecastRequest>,
) -> Result<Json<SubmissionResponse>, (StatusCode, String)> {
    validate_email(&request.email)?;

    let record = NewUserInfo {
        forecast_type: ForecastType::Complex,
        profile: ProductProfile {
            product_name: request.product_name,
            genres: request.genres,
            monetization: request.monetization,
            platforms: request.platforms,
            regions: request.regions,
        },
        company_name: Some(request.company_name),
        email: Some(request.email),
    };

    let submission = state
        .orchestrator
        .submit(record)
        .await
        .map_err(error_response)?;

    Ok(Json(SubmissionResponse::from(&submission)))
}

pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ForecastResponse>, (StatusCode, String)> {
    let forecast_id: ForecastId = id
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid forecast ID".to_string()))?;

    let forecast = state
        .orchestrator
        .forecast_by_id(forecast_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ForecastResponse::from(&forecast)))
}

fn validate_email(email: &str) -> Result<(), (StatusCode, String)> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("Invalid email address: {}", email),
        ))
    }
}

fn error_response(error: Error) -> (StatusCode, String) {
    let status = match &error {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::UserInfoNotFound(_) | Error::ForecastNotFound(_) => StatusCode::NOT_FOUND,
        Error::ForecastConflict { .. } => StatusCode::CONFLICT,
        Error::Persistence(_) | Error::DispatchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}
