//! Configuration file loading for parallel-patterns
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PATTERNS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./patterns.toml` or `./.patterns.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/parallel-patterns/config.toml`
//! 5. Fallback: `~/.config/parallel-patterns/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDispatchConfig, FileEndpointConfig, FileOutputConfig,
    FileSectionConfig, FileSectioningConfig, FileVotingConfig,
};
pub use loader::ConfigLoader;
