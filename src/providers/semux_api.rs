use super::util::with_retry;
use crate::core::api::NodeApi;
use crate::core::config::NodeConfig;
use crate::core::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

/// Envelope the node wraps around every response body.
#[derive(Debug, Deserialize)]
struct NodeResponse {
    success: bool,
    message: Option<String>,
    result: Option<Value>,
}

/// [`NodeApi`] over the node's HTTP API.
pub struct HttpNodeApi {
    base_url: String,
    client: reqwest::Client,
    credentials: Option<(String, Option<String>)>,
    retries: usize,
    retry_delay_ms: u64,
}

impl HttpNodeApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("semscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(HttpNodeApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
            retries: 0,
            retry_delay_ms: 0,
        })
    }

    pub fn from_config(config: &NodeConfig) -> Result<Self, ApiError> {
        let mut api = Self::new(&config.base_url)?.with_retries(config.retries, config.retry_delay_ms);
        if let Some(username) = &config.username {
            api = api.with_credentials(username, config.password.as_deref());
        }
        Ok(api)
    }

    pub fn with_credentials(mut self, username: &str, password: Option<&str>) -> Self {
        self.credentials = Some((username.to_string(), password.map(str::to_string)));
        self
    }

    pub fn with_retries(mut self, retries: usize, delay_ms: u64) -> Self {
        self.retries = retries;
        self.retry_delay_ms = delay_ms;
        self
    }
}

#[async_trait]
impl NodeApi for HttpNodeApi {
    #[instrument(name = "NodeExec", skip(self, method), fields(method = %method))]
    async fn exec(&self, method: Method, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting {}", url);

        let (client, credentials, target) = (&self.client, &self.credentials, url.as_str());
        let response = with_retry(
            || async {
                let mut request = client.request(method.clone(), target);
                if let Some((username, password)) = credentials {
                    request = request.basic_auth(username, password.as_deref());
                }
                request.send().await
            },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| ApiError::Transport(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response from {url}: {e}")))?;

        let envelope: NodeResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Transport(format!("Node returned {status} for {path}")));
            }
            Err(e) => {
                error!(
                    error = ?e,
                    response = %body,
                    "Failed to parse node response"
                );
                return Err(ApiError::Transport(format!(
                    "Failed to parse node response for {path}: {e}"
                )));
            }
        };

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Node returned {status} for {path}"));
            debug!(%status, %message, "Node reported failure");
            return Err(ApiError::Transport(message));
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}
