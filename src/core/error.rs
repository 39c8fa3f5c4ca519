//! Errors surfaced by node calls and record decoding.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network, HTTP or envelope failure. The message is shown to the user as is.
    #[error("{0}")]
    Transport(String),

    /// A numeric or timestamp field in a node record could not be parsed.
    #[error("Malformed {field} in node response: '{value}'")]
    Decode { field: &'static str, value: String },
}

impl ApiError {
    pub fn decode(field: &'static str, value: &str) -> Self {
        ApiError::Decode {
            field,
            value: value.to_string(),
        }
    }
}
