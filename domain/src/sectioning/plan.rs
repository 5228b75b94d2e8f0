//! Section definitions and the ordered plan

use crate::core::error::DomainError;
use crate::core::subject::Subject;
use crate::dispatch::{PromptRequest, RequestId};
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One independent sub-task of a sectioned document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Machine label, also used as the request identifier (e.g. `headlines`)
    pub label: String,
    /// Heading shown in the rendered document (e.g. `Headlines`)
    pub title: String,
    /// Prompt rendered against the topic
    pub template: PromptTemplate,
    /// Text used in place of a missing response; derived from the title when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl Section {
    pub fn new(
        label: impl Into<String>,
        title: impl Into<String>,
        template: impl Into<PromptTemplate>,
    ) -> Self {
        Self {
            label: label.into(),
            title: title.into(),
            template: template.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Text used when this section has no usable response
    pub fn placeholder(&self) -> String {
        match &self.fallback {
            Some(text) => text.clone(),
            None => format!("No {} generated.", self.title.to_lowercase()),
        }
    }
}

/// Ordered, non-empty list of uniquely labelled sections
///
/// The order given here is the canonical output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionPlan {
    sections: Vec<Section>,
}

impl SectionPlan {
    /// Validate and build a plan
    ///
    /// Fails on an empty list, a blank or duplicate label, or a template that
    /// never mentions `{topic}`.
    pub fn new(sections: Vec<Section>) -> Result<Self, DomainError> {
        if sections.is_empty() {
            return Err(DomainError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if section.label.trim().is_empty() {
                return Err(DomainError::EmptySectionLabel);
            }
            if !seen.insert(section.label.as_str()) {
                return Err(DomainError::DuplicateSection(section.label.clone()));
            }
            section.template.require_placeholder(PromptTemplate::TOPIC)?;
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by label
    pub fn get(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    /// One request per section, in plan order, identified by label
    pub fn requests(&self, topic: &Subject) -> Vec<PromptRequest> {
        self.sections
            .iter()
            .map(|s| {
                PromptRequest::new(
                    RequestId::new(s.label.clone()),
                    s.template.render(PromptTemplate::TOPIC, topic),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str) -> Section {
        Section::new(label, label.to_uppercase(), "About {topic}")
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert_eq!(SectionPlan::new(vec![]), Err(DomainError::NoSections));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let result = SectionPlan::new(vec![section("a"), section("b"), section("a")]);
        assert_eq!(result, Err(DomainError::DuplicateSection("a".into())));
    }

    #[test]
    fn test_blank_label_rejected() {
        let result = SectionPlan::new(vec![section(" ")]);
        assert_eq!(result, Err(DomainError::EmptySectionLabel));
    }

    #[test]
    fn test_template_without_topic_rejected() {
        let result = SectionPlan::new(vec![Section::new("a", "A", "No placeholder")]);
        assert_eq!(result, Err(DomainError::MissingPlaceholder("topic".into())));
    }

    #[test]
    fn test_requests_follow_plan_order() {
        let plan = SectionPlan::new(vec![section("z"), section("a"), section("m")]).unwrap();
        let topic = Subject::try_new("agents").unwrap();
        let requests = plan.requests(&topic);

        let ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(requests[0].prompt, "About agents");
    }

    #[test]
    fn test_placeholder_uses_lowercase_title() {
        let s = Section::new("tools", "Tools & Resources", "{topic}");
        assert_eq!(s.placeholder(), "No tools & resources generated.");
    }

    #[test]
    fn test_explicit_fallback_wins() {
        let s = Section::new("tools", "Tools & Resources", "{topic}")
            .with_fallback("No tools/resources generated.");
        assert_eq!(s.placeholder(), "No tools/resources generated.");
    }
}
