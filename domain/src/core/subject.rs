//! Subject value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The input a pattern runs over (Value Object)
///
/// For sectioning this is the topic every section is written about; for
/// voting it is the text every voter classifies. Blank input is rejected so
/// no request is ever issued for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    content: String,
}

impl Subject {
    /// Create a subject, rejecting empty or whitespace-only content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptySubject);
        }
        Ok(Self { content })
    }

    /// Get the subject content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Subject {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Subject::try_new(s)
    }
}

impl TryFrom<String> for Subject {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Subject::try_new(s)
    }
}
