//! Sectioning pattern
//!
//! A [`SectionPlan`] fixes the canonical order of independent sections.
//! After every section request has resolved, [`aggregate_sections`] lays the
//! results out in that order, substituting a placeholder for any section
//! whose request failed or came back blank.

mod document;
mod plan;

pub use document::{SectionEntry, SectionedDocument, aggregate_sections};
pub use plan::{Section, SectionPlan};
