//! Test fixtures for creating sample submissions.

use revcast_core::forecast::ForecastType;
use revcast_core::user_info::{NewUserInfo, ProductProfile};

/// Factory for creating test submissions.
pub struct SubmissionFixture;

impl SubmissionFixture {
    /// The reference profile: "Game A", RPG/Action, F2P, PC, NA.
    pub fn game_a() -> ProductProfile {
        ProductProfile {
            product_name: "Game A".to_string(),
            genres: vec!["RPG".to_string(), "Action".to_string()],
            monetization: "F2P".to_string(),
            platforms: vec!["PC".to_string()],
            regions: vec!["NA".to_string()],
        }
    }

    /// Same fields as [`game_a`], genres reordered.
    pub fn game_a_reordered() -> ProductProfile {
        ProductProfile {
            genres: vec!["Action".to_string(), "RPG".to_string()],
            ..Self::game_a()
        }
    }

    /// A profile with a different relevant field than [`game_a`].
    pub fn game_b() -> ProductProfile {
        ProductProfile {
            product_name: "Game B".to_string(),
            monetization: "Premium".to_string(),
            ..Self::game_a()
        }
    }

    /// A simple-form submission.
    pub fn simple(profile: ProductProfile) -> NewUserInfo {
        NewUserInfo {
            forecast_type: ForecastType::Simple,
            profile,
            company_name: None,
            email: None,
        }
    }

    /// A complex-form submission with company and contact details.
    pub fn complex(profile: ProductProfile) -> NewUserInfo {
        NewUserInfo {
            forecast_type: ForecastType::Complex,
            profile,
            company_name: Some("Indie Studio".to_string()),
            email: Some("dev@indiestudio.example".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revcast_core::Fingerprint;

    #[test]
    fn test_reordered_fixture_shares_fingerprint() {
        assert_eq!(
            Fingerprint::of(&SubmissionFixture::game_a()).unwrap(),
            Fingerprint::of(&SubmissionFixture::game_a_reordered()).unwrap()
        );
    }

    #[test]
    fn test_game_b_fixture_differs() {
        assert_ne!(
            Fingerprint::of(&SubmissionFixture::game_a()).unwrap(),
            Fingerprint::of(&SubmissionFixture::game_b()).unwrap()
        );
    }
}
