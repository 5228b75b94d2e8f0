//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the model identifier sent to the inference endpoint
//! - [`subject::Subject`]: a validated topic or text to run a pattern over
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod subject;
