//! LLM Gateway port
//!
//! Defines the interface for communicating with the inference endpoint.

use async_trait::async_trait;
use patterns_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// None of these abort a fan-out; the dispatcher turns each one into a
/// failed [`CompletionResult`](patterns_domain::CompletionResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Check if the endpoint could not be reached at all
    pub fn is_connection(&self) -> bool {
        matches!(self, GatewayError::ConnectionError(_))
    }
}

/// Gateway for text completion
///
/// This port defines how the application layer talks to the inference
/// endpoint. Implementations (adapters) live in the infrastructure layer.
/// Each call is independent: there is no session or conversation state.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a completion for `prompt` with `model`
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError>;

    /// List the models the endpoint can serve
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}
