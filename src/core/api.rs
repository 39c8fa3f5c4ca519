//! Node transport abstraction.

use crate::core::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Version prefix shared by every node endpoint.
pub const API_PREFIX: &str = "/v2.0.0";

/// Executes a JSON call against the node and returns the unwrapped `result`
/// payload, or the node's failure message.
#[async_trait]
pub trait NodeApi: Send + Sync {
    async fn exec(&self, method: Method, path: &str) -> Result<Value, ApiError>;
}

/// `GET` a path and deserialize the payload into `T`.
pub async fn get<T: DeserializeOwned>(api: &dyn NodeApi, path: &str) -> Result<T, ApiError> {
    let value = api.exec(Method::GET, path).await?;
    serde_json::from_value(value)
        .map_err(|e| ApiError::Transport(format!("Unexpected response shape from {path}: {e}")))
}
