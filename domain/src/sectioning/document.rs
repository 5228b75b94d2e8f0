//! Sectioned document aggregation

use super::plan::SectionPlan;
use crate::core::subject::Subject;
use crate::dispatch::CompletionResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One section of the aggregated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Section label from the plan
    pub label: String,
    /// Heading shown in the document
    pub title: String,
    /// Text shown in the document: the response, or the placeholder
    pub content: String,
    /// Raw response text (empty when the request failed)
    pub raw: String,
    /// Whether the section has a real response
    pub success: bool,
    /// Why the placeholder was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sectioned document in canonical plan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedDocument {
    /// The topic the sections were written about
    pub topic: String,
    /// One entry per planned section, in plan order
    pub sections: Vec<SectionEntry>,
}

impl SectionedDocument {
    /// Returns an iterator over sections that have a real response.
    pub fn successful_sections(&self) -> impl Iterator<Item = &SectionEntry> {
        self.sections.iter().filter(|s| s.success)
    }

    /// Returns an iterator over sections that show a placeholder.
    pub fn failed_sections(&self) -> impl Iterator<Item = &SectionEntry> {
        self.sections.iter().filter(|s| !s.success)
    }

    pub fn successful_count(&self) -> usize {
        self.successful_sections().count()
    }

    /// True when no section produced a response
    pub fn is_empty_result(&self) -> bool {
        self.successful_count() == 0
    }

    /// Concatenate all sections as markdown
    ///
    /// Each section becomes a `## <title>` heading followed by its content;
    /// sections are separated by horizontal rules.
    pub fn to_markdown(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("## {}\n\n{}", s.title, s.content.trim()))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}

/// Lay out `results` in the canonical order of `plan`
///
/// Arrival order of `results` is irrelevant; each result is matched to its
/// section by identifier. A section whose result failed, came back blank, or
/// is missing altogether keeps its position and shows its placeholder.
/// Results whose identifier is not in the plan are ignored.
pub fn aggregate_sections(
    plan: &SectionPlan,
    topic: &Subject,
    results: Vec<CompletionResult>,
) -> SectionedDocument {
    let mut by_label: HashMap<String, CompletionResult> = results
        .into_iter()
        .map(|r| (r.id.as_str().to_string(), r))
        .collect();

    let sections = plan
        .sections()
        .iter()
        .map(|section| match by_label.remove(&section.label) {
            Some(result) if result.has_content() => SectionEntry {
                label: section.label.clone(),
                title: section.title.clone(),
                content: result.text.clone(),
                raw: result.text,
                success: true,
                error: None,
            },
            Some(result) => {
                let error = match result.error {
                    Some(e) => e,
                    None => "empty response".to_string(),
                };
                SectionEntry {
                    label: section.label.clone(),
                    title: section.title.clone(),
                    content: section.placeholder(),
                    raw: result.text,
                    success: false,
                    error: Some(error),
                }
            }
            None => SectionEntry {
                label: section.label.clone(),
                title: section.title.clone(),
                content: section.placeholder(),
                raw: String::new(),
                success: false,
                error: Some("no result received".to_string()),
            },
        })
        .collect();

    SectionedDocument {
        topic: topic.content().to_string(),
        sections,
    }
}
