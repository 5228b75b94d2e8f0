//! Application layer for parallel-patterns
//!
//! This crate contains the request dispatcher, the two pattern use cases,
//! and the port definitions they depend on. It depends only on the domain
//! layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DispatchConfig;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::dispatch::{DispatchError, RequestDispatcher};
pub use use_cases::run_sectioning::{
    RunSectioningError, RunSectioningInput, RunSectioningOutput, RunSectioningUseCase,
};
pub use use_cases::run_voting::{
    RunVotingError, RunVotingInput, RunVotingOutput, RunVotingUseCase,
};
