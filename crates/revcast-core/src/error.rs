//! Error types for Revcast.

use crate::ids::{ForecastId, UserInfoId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Lookup errors
    #[error("User info not found: {0}")]
    UserInfoNotFound(UserInfoId),

    #[error("Forecast not found: {0}")]
    ForecastNotFound(ForecastId),

    // Invariant violations
    #[error("User info {user_info_id} already linked to forecast {existing}, refusing {requested}")]
    ForecastConflict {
        user_info_id: UserInfoId,
        existing: ForecastId,
        requested: ForecastId,
    },

    // Infrastructure errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Dispatch channel unavailable: {0}")]
    DispatchUnavailable(String),

    #[error("Computation failed: {0}")]
    ComputeFailed(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Persistence(_) | Error::DispatchUnavailable(_) | Error::Cache(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
