//! Cache key layout.

use revcast_core::Fingerprint;

/// Key prefix for forecast entries.
const FORECAST_PREFIX: &str = "forecast";

/// Build the cache key for a fingerprint.
pub fn forecast_key(fingerprint: &Fingerprint) -> String {
    format!("{}:{}", FORECAST_PREFIX, fingerprint.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_key() {
        let fp = Fingerprint::from_hex("abc123");
        assert_eq!(forecast_key(&fp), "forecast:abc123");
    }
}
