//! Endpoint configuration from TOML (`[endpoint]` section)

use crate::ollama::OllamaConfig;
use patterns_domain::Model;
use serde::{Deserialize, Serialize};

/// Raw endpoint configuration from TOML
///
/// # Example
///
/// ```toml
/// [endpoint]
/// url = "http://localhost:11434"
/// model = "gemma3"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Ollama server root
    pub url: String,
    /// Model used for every request
    pub model: String,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: OllamaConfig::DEFAULT_BASE_URL.to_string(),
            model: Model::DEFAULT.to_string(),
        }
    }
}

impl FileEndpointConfig {
    pub fn to_ollama_config(&self) -> OllamaConfig {
        OllamaConfig::new(self.url.trim())
    }

    pub fn to_model(&self) -> Model {
        Model::new(self.model.trim())
    }
}
