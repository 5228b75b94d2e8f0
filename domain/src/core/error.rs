//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// All of these describe invalid input supplied by the caller. Runtime
/// failures of the inference endpoint are never domain errors; they are
/// carried inside [`CompletionResult`](crate::CompletionResult) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Subject cannot be empty")]
    EmptySubject,

    #[error("At least one section is required")]
    NoSections,

    #[error("Duplicate section label: {0}")]
    DuplicateSection(String),

    #[error("Section label cannot be empty")]
    EmptySectionLabel,

    #[error("At least one voter prompt is required")]
    NoVoters,

    #[error("Label set cannot be empty")]
    EmptyLabelSet,

    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("Invalid label: {0:?}")]
    InvalidLabel(String),

    #[error("Prompt template is missing the {{{0}}} placeholder")]
    MissingPlaceholder(String),
}
