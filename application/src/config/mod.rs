//! Application-level configuration.
//!
//! - [`DispatchConfig`]: model and concurrency cap for one dispatcher

pub mod dispatch_config;

pub use dispatch_config::DispatchConfig;
