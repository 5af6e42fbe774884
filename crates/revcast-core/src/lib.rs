//! Revcast Core
//!
//! Core domain types, traits, and error handling for Revcast.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod error;
pub mod fingerprint;
pub mod forecast;
pub mod ids;
pub mod messages;
pub mod ports;
pub mod user_info;

pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use ids::*;
