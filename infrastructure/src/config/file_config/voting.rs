//! Voting configuration from TOML (`[voting]` section)

use patterns_domain::{AmbiguityPolicy, DomainError, LabelSet, PromptTemplate, defaults};
use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
///
/// # Example
///
/// ```toml
/// [voting]
/// labels = ["SPAM", "HAM"]
/// ambiguity = "reject"
/// prompts = [
///     "Is this message spam? Answer SPAM or HAM.\nMessage: {text}",
///     "Classify as SPAM or HAM, one word only.\n{text}",
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Allowed labels; the first one wins ties
    pub labels: Vec<String>,
    /// One prompt per voter; each must contain `{text}`
    pub prompts: Vec<String>,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            labels: defaults::SENTIMENT_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            prompts: defaults::sentiment_prompts()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

impl FileVotingConfig {
    pub fn label_set(&self) -> Result<LabelSet, DomainError> {
        LabelSet::new(&self.labels)
    }

    pub fn voter_prompts(&self) -> Result<Vec<PromptTemplate>, DomainError> {
        if self.prompts.is_empty() {
            return Err(DomainError::NoVoters);
        }
        self.prompts
            .iter()
            .map(|p| {
                let template = PromptTemplate::new(p.as_str());
                template.require_placeholder(PromptTemplate::TEXT)?;
                Ok(template)
            })
            .collect()
    }
}
