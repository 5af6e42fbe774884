//! Wire messages exchanged between the orchestrator and compute workers.

use crate::fingerprint::Fingerprint;
use crate::forecast::{Forecast, ForecastType};
use crate::ids::UserInfoId;
use crate::user_info::ProductProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subject computation requests are published on.
pub const COMPUTE_SUBJECT: &str = "forecast.compute.request";

/// Queue group shared by all compute workers.
pub const COMPUTE_QUEUE_GROUP: &str = "forecast-workers";

/// A request for one forecast computation.
///
/// Carries everything the worker needs so it never has to read the
/// submission back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub user_info_id: UserInfoId,
    pub forecast_type: ForecastType,
    pub fingerprint: Fingerprint,
    pub profile: ProductProfile,
    pub requested_at: DateTime<Utc>,
}

/// Worker reply to a [`ComputeRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComputeReply {
    /// The canonical persisted forecast for the requested fingerprint.
    Completed { forecast: Forecast },
    /// The worker could not compute or persist a forecast.
    Failed { message: String },
}
