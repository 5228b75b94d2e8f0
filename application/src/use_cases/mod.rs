//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dispatch;
pub mod run_sectioning;
pub mod run_voting;

#[cfg(test)]
pub(crate) mod test_support;
