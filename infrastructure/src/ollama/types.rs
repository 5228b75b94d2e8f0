//! Wire types for the Ollama REST API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
pub(super) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// Always `false`: the whole completion comes back in one body
    pub stream: bool,
}

/// Non-streaming response of `POST /api/generate`
///
/// Only `response` is required; timing fields are logged when present.
#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Response of `GET /api/tags`
#[derive(Debug, Deserialize)]
pub(super) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TagEntry {
    pub name: String,
}

/// Error body Ollama returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: String,
}
