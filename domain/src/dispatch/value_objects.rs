//! Request and result records for a single fan-out.

use serde::{Deserialize, Serialize};

/// Identifier tying a result back to the request that produced it
///
/// Section labels (`headlines`) for sectioning, voter indices (`voter-1`)
/// for voting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the voter at `index` (zero-based), displayed one-based
    pub fn voter(index: usize) -> Self {
        Self(format!("voter-{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One prompt to send to the inference endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Identifier of this request within its batch
    pub id: RequestId,
    /// Fully rendered prompt text
    pub prompt: String,
}

impl PromptRequest {
    pub fn new(id: impl Into<RequestId>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }
}

/// Outcome of a single request
///
/// A failed request still produces a result; `success` is false and `error`
/// carries the reason. `text` is empty in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Identifier of the originating request
    pub id: RequestId,
    /// Raw response text
    pub text: String,
    /// Whether the endpoint produced a response
    pub success: bool,
    /// Error detail if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionResult {
    /// Creates a successful result.
    pub fn success(id: impl Into<RequestId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            success: true,
            error: None,
        }
    }

    /// Creates a failed result.
    pub fn failure(id: impl Into<RequestId>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }

    /// Returns `true` if the request succeeded with non-blank text.
    pub fn has_content(&self) -> bool {
        self.success && !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voter_ids_are_one_based() {
        assert_eq!(RequestId::voter(0).as_str(), "voter-1");
        assert_eq!(RequestId::voter(2).to_string(), "voter-3");
    }

    #[test]
    fn test_failure_has_no_content() {
        let result = CompletionResult::failure("headlines", "status 500");
        assert!(!result.success);
        assert!(!result.has_content());
        assert_eq!(result.error.as_deref(), Some("status 500"));
    }

    #[test]
    fn test_blank_success_has_no_content() {
        assert!(!CompletionResult::success("a", "  \n").has_content());
        assert!(CompletionResult::success("a", "POSITIVE").has_content());
    }

    #[test]
    fn test_serialize_skips_missing_error() {
        let json = serde_json::to_value(CompletionResult::success("voter-1", "NEUTRAL")).unwrap();
        assert_eq!(json["id"], "voter-1");
        assert!(json.get("error").is_none());
    }
}
