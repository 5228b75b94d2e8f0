//! Ollama LLM Gateway implementation

use super::types::{ErrorResponse, GenerateRequest, GenerateResponse, TagsResponse};
use async_trait::async_trait;
use patterns_application::ports::llm_gateway::{GatewayError, LlmGateway};
use patterns_domain::Model;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Endpoint settings for a local Ollama server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`
    pub base_url: String,
}

impl OllamaConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `POST` target for completions
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.root())
    }

    /// `GET` target for the model listing
    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.root())
    }

    fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

/// LLM Gateway implementation for Ollama's REST API
pub struct OllamaGateway {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaGateway {
    /// Create a gateway with its own HTTP client
    ///
    /// No request timeout is set; calls wait as long as the transport does.
    pub fn new(config: OllamaConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parallel-patterns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, "OllamaGateway initialized");

        Ok(Self { client, config })
    }

    /// Create a gateway around an existing client
    pub fn with_client(client: reqwest::Client, config: OllamaConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_connect() {
            GatewayError::ConnectionError(format!(
                "cannot reach Ollama at {}: {}",
                self.config.base_url, e
            ))
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }

    /// Turn a non-2xx response into `HttpStatus`, preferring Ollama's own message
    async fn status_error(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => err.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status.canonical_reason().unwrap_or("unknown status").to_string(),
        };

        GatewayError::HttpStatus {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            model: model.as_str(),
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.config.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("malformed body: {}", e)))?;

        debug!(
            model = %model,
            eval_count = ?parsed.eval_count,
            total_duration_ns = ?parsed.total_duration,
            "Generate completed"
        );

        Ok(parsed.response)
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let response = self
            .client
            .get(self.config.tags_url())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("malformed body: {}", e)))?;

        Ok(tags
            .models
            .into_iter()
            .map(|entry| Model::new(entry.name))
            .collect())
    }
}
