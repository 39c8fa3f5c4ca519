//! Parsing helpers for the string-encoded fields of node records.

use crate::core::amount::{Amount, is_unsigned_digits};
use crate::core::error::ApiError;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Integer the node sometimes sends as a JSON number and sometimes as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireInt {
    Number(u64),
    Text(String),
    /// Negative, fractional or non-scalar values, rejected on decode.
    Other(serde_json::Value),
}

impl WireInt {
    pub fn decode(&self, field: &'static str) -> Result<u64, ApiError> {
        match self {
            WireInt::Number(n) => Ok(*n),
            WireInt::Text(raw) => integer(field, raw),
            WireInt::Other(value) => integer(field, &value.to_string()),
        }
    }
}

pub fn integer(field: &'static str, raw: &str) -> Result<u64, ApiError> {
    let trimmed = raw.trim();
    if !is_unsigned_digits(trimmed) {
        return Err(ApiError::decode(field, raw));
    }
    trimmed.parse().map_err(|_| ApiError::decode(field, raw))
}

pub fn amount(field: &'static str, raw: &str) -> Result<Amount, ApiError> {
    Amount::from_nano(raw).ok_or_else(|| ApiError::decode(field, raw))
}

/// Milliseconds since the Unix epoch.
pub fn millis(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let ms: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::decode(field, raw))?;
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| ApiError::decode(field, raw))
}
