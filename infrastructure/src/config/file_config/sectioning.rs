//! Sectioning configuration from TOML (`[sectioning]` section)

use patterns_domain::{DomainError, PromptTemplate, Section, SectionPlan, defaults};
use serde::{Deserialize, Serialize};

/// Raw sectioning configuration from TOML
///
/// Defaults to the built-in AI newsletter. Declaring any
/// `[[sectioning.sections]]` replaces the whole list; order in the file is
/// the order in the document.
///
/// # Example
///
/// ```toml
/// [sectioning]
/// title = "Weekly Digest"
///
/// [[sectioning.sections]]
/// label = "summary"
/// title = "Summary"
/// prompt = "Summarize this week's news about {topic}."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSectioningConfig {
    /// Document heading shown before the topic
    pub title: String,
    pub sections: Vec<FileSectionConfig>,
}

/// One `[[sectioning.sections]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSectionConfig {
    pub label: String,
    pub title: String,
    /// Prompt template; must contain `{topic}`
    pub prompt: String,
    /// Text shown when the section fails (default: `No <title> generated.`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl Default for FileSectioningConfig {
    fn default() -> Self {
        let sections = defaults::newsletter_plan()
            .sections()
            .iter()
            .map(|s| FileSectionConfig {
                label: s.label.clone(),
                title: s.title.clone(),
                prompt: s.template.as_str().to_string(),
                fallback: s.fallback.clone(),
            })
            .collect();

        Self {
            title: defaults::NEWSLETTER_TITLE.to_string(),
            sections,
        }
    }
}

impl FileSectioningConfig {
    pub fn to_section_plan(&self) -> Result<SectionPlan, DomainError> {
        let sections = self
            .sections
            .iter()
            .map(|s| {
                let section = Section::new(
                    s.label.trim(),
                    s.title.trim(),
                    PromptTemplate::new(s.prompt.as_str()),
                );
                match &s.fallback {
                    Some(text) => section.with_fallback(text.as_str()),
                    None => section,
                }
            })
            .collect();
        SectionPlan::new(sections)
    }
}
