//! Label sets and label extraction from free-form responses.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Ordered set of valid labels
///
/// Labels are normalized to upper case. The order is significant: it is the
/// display order of the tally and the tie-break priority.
///
/// # Example
///
/// ```
/// use patterns_domain::LabelSet;
///
/// let labels = LabelSet::new(["positive", "negative", "neutral"]).unwrap();
/// assert_eq!(labels.labels(), ["POSITIVE", "NEGATIVE", "NEUTRAL"]);
/// assert!(labels.contains("Neutral"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build a label set, rejecting empty sets, duplicates and labels that
    /// are not a single word (letters, digits, `_`)
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for raw in labels {
            let label = raw.as_ref().trim().to_uppercase();
            if label.is_empty() || !label.chars().all(is_word_char) {
                return Err(DomainError::InvalidLabel(raw.as_ref().to_string()));
            }
            if normalized.contains(&label) {
                return Err(DomainError::DuplicateLabel(label));
            }
            normalized.push(label);
        }

        if normalized.is_empty() {
            return Err(DomainError::EmptyLabelSet);
        }

        Ok(Self { labels: normalized })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Case-insensitive membership test
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Priority of `label` (0 = highest), case-insensitive
    pub fn position(&self, label: &str) -> Option<usize> {
        let upper = label.trim().to_uppercase();
        self.labels.iter().position(|l| *l == upper)
    }
}

/// What to do with a response that names more than one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// The label that appears earliest in the response wins
    #[default]
    FirstMatch,
    /// The response is excluded from the tally
    Reject,
}

impl std::str::FromStr for AmbiguityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_match" => Ok(Self::FirstMatch),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "Unknown ambiguity policy: {}. Valid: first_match, reject",
                other
            )),
        }
    }
}

impl std::fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstMatch => write!(f, "first_match"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Result of reading a label out of one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelExtraction {
    /// Exactly one label was selected
    Matched(String),
    /// Several distinct labels were named and the policy rejects that
    Ambiguous(Vec<String>),
    /// No known label appears in the response
    Unrecognized,
}

impl LabelExtraction {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Matched(label) => Some(label),
            _ => None,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Extract a label from a free-form response
///
/// The response is split into words and compared case-insensitively against
/// `labels`, so `"Positive."` matches `POSITIVE` but `"NEUTRALITY"` does not
/// match `NEUTRAL`. Repeating the same label is not ambiguous.
///
/// # Examples
///
/// ```
/// use patterns_domain::{AmbiguityPolicy, LabelExtraction, LabelSet, extract_label};
///
/// let labels = LabelSet::new(["POSITIVE", "NEGATIVE", "NEUTRAL"]).unwrap();
///
/// let vote = extract_label("  positive\n", &labels, AmbiguityPolicy::FirstMatch);
/// assert_eq!(vote.label(), Some("POSITIVE"));
///
/// let mixed = "NEGATIVE, though partly POSITIVE";
/// assert_eq!(extract_label(mixed, &labels, AmbiguityPolicy::FirstMatch).label(), Some("NEGATIVE"));
/// assert!(matches!(
///     extract_label(mixed, &labels, AmbiguityPolicy::Reject),
///     LabelExtraction::Ambiguous(_)
/// ));
///
/// assert_eq!(extract_label("", &labels, AmbiguityPolicy::FirstMatch), LabelExtraction::Unrecognized);
/// ```
pub fn extract_label(
    response: &str,
    labels: &LabelSet,
    policy: AmbiguityPolicy,
) -> LabelExtraction {
    let upper = response.to_uppercase();

    let mut found: Vec<String> = Vec::new();
    for word in upper.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty()) {
        if labels.labels.iter().any(|l| l == word) && !found.iter().any(|f| f == word) {
            found.push(word.to_string());
        }
    }

    match (found.len(), policy) {
        (0, _) => LabelExtraction::Unrecognized,
        (1, _) | (_, AmbiguityPolicy::FirstMatch) => LabelExtraction::Matched(found.remove(0)),
        (_, AmbiguityPolicy::Reject) => LabelExtraction::Ambiguous(found),
    }
}
