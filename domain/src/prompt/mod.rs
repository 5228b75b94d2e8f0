//! Prompt domain
//!
//! Templates rendered against a [`Subject`](crate::Subject), plus the
//! built-in newsletter sections and sentiment voters.

pub mod defaults;
mod template;

pub use template::PromptTemplate;
