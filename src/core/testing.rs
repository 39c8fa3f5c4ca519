//! In-memory node used by unit tests.

use crate::core::api::NodeApi;
use crate::core::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockNodeApi {
    responses: HashMap<String, Result<Value, ApiError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockNodeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, value: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(value));
        self
    }

    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.responses
            .insert(path.to_string(), Err(ApiError::Transport(message.to_string())));
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeApi for MockNodeApi {
    async fn exec(&self, _method: Method, path: &str) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(path.to_string());
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        self.responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Transport(format!("No mock for {path}"))))
    }
}
