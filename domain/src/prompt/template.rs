//! Prompt templates with a single named placeholder

use crate::core::error::DomainError;
use crate::core::subject::Subject;
use serde::{Deserialize, Serialize};

/// A prompt with one `{name}` placeholder
///
/// Section prompts use `{topic}`, voter prompts use `{text}`. Every
/// occurrence of the placeholder is replaced; other braces are left alone so
/// templates may contain JSON examples.
///
/// # Example
///
/// ```
/// use patterns_domain::{PromptTemplate, Subject};
///
/// let template = PromptTemplate::new("Write headlines about {topic} in AI.");
/// let subject = Subject::try_new("robotics").unwrap();
/// assert_eq!(
///     template.render(PromptTemplate::TOPIC, &subject),
///     "Write headlines about robotics in AI."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Placeholder name used by section prompts
    pub const TOPIC: &'static str = "topic";
    /// Placeholder name used by voter prompts
    pub const TEXT: &'static str = "text";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template contains `{placeholder}`
    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        self.0.contains(&Self::token(placeholder))
    }

    /// Fail unless the template references `{placeholder}`
    pub fn require_placeholder(&self, placeholder: &str) -> Result<(), DomainError> {
        if self.has_placeholder(placeholder) {
            Ok(())
        } else {
            Err(DomainError::MissingPlaceholder(placeholder.to_string()))
        }
    }

    /// Substitute the subject for every `{placeholder}`
    pub fn render(&self, placeholder: &str, subject: &Subject) -> String {
        self.0.replace(&Self::token(placeholder), subject.content())
    }

    fn token(placeholder: &str) -> String {
        format!("{{{}}}", placeholder)
    }
}

impl From<&str> for PromptTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PromptTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
