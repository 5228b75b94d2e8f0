//! Infrastructure layer for parallel-patterns
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDispatchConfig, FileEndpointConfig,
    FileOutputConfig, FileSectionConfig, FileSectioningConfig, FileVotingConfig,
};
pub use ollama::{OllamaConfig, OllamaGateway};
