//! Dispatch value objects
//!
//! The records exchanged with the request dispatcher: one [`PromptRequest`]
//! goes in per prompt, one [`CompletionResult`] comes out per request.

mod value_objects;

pub use value_objects::{CompletionResult, PromptRequest, RequestId};
