//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod dispatch;
mod endpoint;
mod output;
mod sectioning;
mod voting;

pub use dispatch::FileDispatchConfig;
pub use endpoint::FileEndpointConfig;
pub use output::FileOutputConfig;
pub use sectioning::{FileSectionConfig, FileSectioningConfig};
pub use voting::FileVotingConfig;

use patterns_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("endpoint.url cannot be empty")]
    EmptyUrl,

    #[error("endpoint.url must start with http:// or https:// (got '{0}')")]
    InvalidUrl(String),

    #[error("endpoint.model cannot be empty")]
    EmptyModelName,

    #[error("dispatch.max_concurrency cannot be 0")]
    ZeroConcurrency,

    #[error("sectioning: {0}")]
    Sectioning(DomainError),

    #[error("voting: {0}")]
    Voting(DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Inference endpoint and model
    pub endpoint: FileEndpointConfig,
    /// Fan-out settings
    pub dispatch: FileDispatchConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Section plan for `section`
    pub sectioning: FileSectioningConfig,
    /// Voters and labels for `vote`
    pub voting: FileVotingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let url = self.endpoint.url.trim();
        if url.is_empty() {
            issues.push(ConfigValidationError::EmptyUrl);
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigValidationError::InvalidUrl(url.to_string()));
        }

        if self.endpoint.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }

        if self.dispatch.max_concurrency == Some(0) {
            issues.push(ConfigValidationError::ZeroConcurrency);
        }

        if let Err(e) = self.sectioning.to_section_plan() {
            issues.push(ConfigValidationError::Sectioning(e));
        }

        if let Err(e) = self.voting.label_set() {
            issues.push(ConfigValidationError::Voting(e));
        }
        if let Err(e) = self.voting.voter_prompts() {
            issues.push(ConfigValidationError::Voting(e));
        }

        issues
    }
}
