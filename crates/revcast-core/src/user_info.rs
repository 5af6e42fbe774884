//! Submitted product records.

use crate::forecast::ForecastType;
use crate::ids::{ForecastId, UserInfoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The forecast-relevant subset of a submission.
///
/// Only these fields participate in fingerprint derivation; contact and
/// company details never influence the computed forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductProfile {
    pub product_name: String,
    pub genres: Vec<String>,
    pub monetization: String,
    pub platforms: Vec<String>,
    pub regions: Vec<String>,
}

/// A submission before the store has assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserInfo {
    pub forecast_type: ForecastType,
    pub profile: ProductProfile,
    pub company_name: Option<String>,
    pub email: Option<String>,
}

/// A persisted submission. Immutable once created, except for the single
/// forecast linkage set after computation completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserInfoId,
    pub forecast_type: ForecastType,
    pub profile: ProductProfile,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub forecast_id: Option<ForecastId>,
    pub created_at: DateTime<Utc>,
}

impl UserInfo {
    /// A record is linked once its forecast id has been attached.
    pub fn is_linked(&self) -> bool {
        self.forecast_id.is_some()
    }
}
