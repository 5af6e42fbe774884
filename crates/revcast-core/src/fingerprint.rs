//! Fingerprint derivation for submitted product profiles.
//!
//! A fingerprint is a reproducible SHA-256 digest over the forecast-relevant
//! fields of a submission. Two profiles with the same values always produce
//! the same fingerprint, independent of the ordering inside list fields.

use crate::user_info::ProductProfile;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 digest of a [`ProductProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint of a profile.
    ///
    /// Fails with [`Error::InvalidInput`] when the product name or
    /// monetization model is blank, or when a list field carries no
    /// non-blank value.
    pub fn of(profile: &ProductProfile) -> Result<Self> {
        let product_name = required(&profile.product_name, "productName")?;
        let monetization = required(&profile.monetization, "monetization")?;
        let genres = required_list(&profile.genres, "genres")?;
        let platforms = required_list(&profile.platforms, "platforms")?;
        let regions = required_list(&profile.regions, "regions")?;

        let mut hasher = Sha256::new();
        hash_field(&mut hasher, "productName", product_name);
        hash_list(&mut hasher, "genres", &genres);
        hash_field(&mut hasher, "monetization", monetization);
        hash_list(&mut hasher, "platforms", &platforms);
        hash_list(&mut hasher, "regions", &regions);

        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// Wrap an already-derived hex digest, e.g. read back from the store.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

/// Trims entries, drops blanks, and sorts so ordering carries no meaning.
fn required_list<'a>(values: &'a [String], field: &str) -> Result<Vec<&'a str>> {
    let mut cleaned: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{} must contain at least one value",
            field
        )));
    }
    cleaned.sort_unstable();
    Ok(cleaned)
}

// Field tags and length prefixes keep adjacent values from colliding
// ("ab" + "c" vs "a" + "bc").
fn hash_field(hasher: &mut Sha256, tag: &str, value: &str) {
    hasher.update(tag.as_bytes());
    hasher.update((value.len() as u32).to_be_bytes());
    hasher.update(value.as_bytes());
}

fn hash_list(hasher: &mut Sha256, tag: &str, values: &[&str]) {
    hasher.update(tag.as_bytes());
    hasher.update((values.len() as u32).to_be_bytes());
    for value in values {
        hasher.update((value.len() as u32).to_be_bytes());
        hasher.update(value.as_bytes());
    }
}
