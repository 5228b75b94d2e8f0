//! Domain layer for parallel-patterns
//!
//! This crate contains the core value objects and the aggregation logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sectioning
//!
//! One task is split into independent sub-tasks (sections). Each section is
//! sent to the model concurrently and the outputs are concatenated in the
//! canonical order of the [`SectionPlan`], never in arrival order.
//!
//! ## Voting
//!
//! Several variant prompts classify the same input. Each response is reduced
//! to a label from a fixed [`LabelSet`] and the most frequent label wins.
//!
//! ```text
//! PromptRequest ×N ──▶ (dispatcher) ──▶ CompletionResult ×N
//!                                            │
//!                      ┌─────────────────────┴──────────────────┐
//!                      ▼                                        ▼
//!              SectionedDocument                           VoteTally
//! ```

pub mod config;
pub mod core;
pub mod dispatch;
pub mod prompt;
pub mod sectioning;
pub mod voting;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model, subject::Subject};
pub use dispatch::{CompletionResult, PromptRequest, RequestId};
pub use prompt::{PromptTemplate, defaults};
pub use sectioning::{Section, SectionEntry, SectionPlan, SectionedDocument, aggregate_sections};
pub use voting::{
    AmbiguityPolicy, Ballot, LabelCount, LabelExtraction, LabelSet, VoteTally, extract_label,
    tally_votes,
};
