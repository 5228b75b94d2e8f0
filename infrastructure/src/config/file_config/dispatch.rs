//! Dispatch configuration from TOML (`[dispatch]` section)

use patterns_application::DispatchConfig;
use patterns_domain::Model;
use serde::{Deserialize, Serialize};

/// Raw dispatch configuration from TOML
///
/// Leaving `max_concurrency` out issues every request at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Upper bound on requests in flight
    pub max_concurrency: Option<usize>,
}

impl FileDispatchConfig {
    pub fn to_dispatch_config(&self, model: Model) -> DispatchConfig {
        DispatchConfig::new(model).with_max_concurrency(self.max_concurrency)
    }
}
