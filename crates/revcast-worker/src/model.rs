//! The forecast model seam and the built-in baseline model.

use async_trait::async_trait;
use revcast_core::forecast::ProjectionPoint;
use revcast_core::messages::ComputeRequest;
use revcast_core::Result;

/// The opaque forecasting function.
///
/// A model maps a computation request to a monthly revenue projection.
/// It must be a pure function of the request's forecast-relevant fields:
/// identical requests produce identical projections, which makes
/// recomputation after duplicate dispatch harmless.
#[async_trait]
pub trait ForecastModel: Send + Sync {
    async fn project(&self, request: &ComputeRequest) -> Result<Vec<ProjectionPoint>>;
}

/// Months covered by a baseline projection.
const PROJECTION_HORIZON: u32 = 12;

/// Heuristic baseline model.
///
/// Derives a monthly revenue figure from monetization, platform, and
/// region weights, shaped over a ramp-then-decay launch curve. Numbers are
/// indicative, not predictive; the model exists so the pipeline has a
/// deterministic computation to orchestrate.
pub struct BaselineModel;

impl BaselineModel {
    pub fn new() -> Self {
        Self
    }

    fn monetization_base(monetization: &str) -> f64 {
        match monetization.trim().to_ascii_lowercase().as_str() {
            "f2p" | "free2play" | "free-to-play" => 25_000.0,
            "premium" | "paid" | "buy2play" => 40_000.0,
            "subscription" => 60_000.0,
            _ => 20_000.0,
        }
    }

    fn platform_weight(platform: &str) -> f64 {
        match platform.trim().to_ascii_lowercase().as_str() {
            "pc" | "steam" => 1.0,
            "console" | "playstation" | "ps4" | "ps5" | "xbox" | "switch" => 1.2,
            "mobile" | "ios" | "android" => 1.5,
            "web" => 0.6,
            _ => 0.8,
        }
    }

    fn region_weight(region: &str) -> f64 {
        match region.trim().to_ascii_lowercase().as_str() {
            "na" | "north america" => 1.0,
            "eu" | "europe" => 0.9,
            "asia" | "apac" | "cn" | "jp" | "kr" => 1.1,
            "latam" | "sa" | "south america" => 0.5,
            _ => 0.4,
        }
    }

    /// Launch curve: three-month ramp to peak, then gentle decay.
    fn launch_curve(month: u32) -> f64 {
        match month {
            1 => 0.6,
            2 => 0.8,
            3 => 1.0,
            m => 0.97_f64.powi(m as i32 - 3),
        }
    }

    /// Stable per-fingerprint variation in [0.9, 1.1), so distinct products
    /// with the same weights still produce distinguishable projections.
    fn fingerprint_jitter(fingerprint: &str) -> f64 {
        let nibble_sum: u32 = fingerprint
            .bytes()
            .take(8)
            .filter_map(|b| (b as char).to_digit(16))
            .sum();
        0.9 + f64::from(nibble_sum % 120) / 600.0
    }
}

impl Default for BaselineModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastModel for BaselineModel {
    async fn project(&self, request: &ComputeRequest) -> Result<Vec<ProjectionPoint>> {
        let profile = &request.profile;

        let base = Self::monetization_base(&profile.monetization);
        let platforms: f64 = profile
            .platforms
            .iter()
            .map(|p| Self::platform_weight(p))
            .sum();
        let regions: f64 = profile.regions.iter().map(|r| Self::region_weight(r)).sum();
        let genre_factor = 1.0 + 0.05 * (profile.genres.len().saturating_sub(1) as f64);
        let jitter = Self::fingerprint_jitter(request.fingerprint.as_str());

        let monthly_peak = base * platforms * regions * genre_factor * jitter;

        let projection = (1..=PROJECTION_HORIZON)
            .map(|month| ProjectionPoint {
                month,
                revenue: (monthly_peak * Self::launch_curve(month) * 100.0).round() / 100.0,
            })
            .collect();

        Ok(projection)
    }
}
