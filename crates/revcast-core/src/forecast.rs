//! Computed revenue forecasts.

use crate::fingerprint::Fingerprint;
use crate::ids::ForecastId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which input variant produced the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastType {
    Simple,
    Complex,
}

/// Projected revenue for a single month, 1-based from submission time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub revenue: f64,
}

/// A computed revenue projection for one fingerprint.
///
/// Immutable after creation. Exactly one canonical forecast exists per
/// fingerprint in the durable store; any number of user records may link
/// to it by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub id: ForecastId,
    pub forecast_type: ForecastType,
    pub fingerprint: Fingerprint,
    pub projection: Vec<ProjectionPoint>,
    pub created_at: DateTime<Utc>,
}

impl Forecast {
    /// Sum of the projected revenue across all months.
    pub fn total_revenue(&self) -> f64 {
        self.projection.iter().map(|p| p.revenue).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_revenue() {
        let forecast = Forecast {
            id: ForecastId::new(),
            forecast_type: ForecastType::Simple,
            fingerprint: Fingerprint::from_hex("ab".repeat(32)),
            projection: vec![
                ProjectionPoint {
                    month: 1,
                    revenue: 100.0,
                },
                ProjectionPoint {
                    month: 2,
                    revenue: 150.0,
                },
            ],
            created_at: Utc::now(),
        };
        assert_eq!(forecast.total_revenue(), 250.0);
    }

    #[test]
    fn test_forecast_type_serde() {
        let json = serde_json::to_string(&ForecastType::Complex).unwrap();
        assert_eq!(json, "\"complex\"");
    }
}
