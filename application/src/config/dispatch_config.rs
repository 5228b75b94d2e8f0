//! Dispatch parameters: per-dispatcher request settings.
//!
//! [`DispatchConfig`] is handed to a
//! [`RequestDispatcher`](crate::use_cases::dispatch::RequestDispatcher) at
//! construction. Nothing here is process-wide, so differently configured
//! dispatchers can run side by side.

use patterns_domain::Model;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

/// Request settings shared by every prompt in a fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Model every request is sent to.
    pub model: Model,
    /// Maximum requests in flight at once. `None` issues all at once.
    pub max_concurrency: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_concurrency: None,
        }
    }
}

impl DispatchConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max;
        self
    }

    /// Effective cap, between 1 and the most permits a semaphore can hold.
    pub fn concurrency_limit(&self) -> Option<usize> {
        self.max_concurrency
            .map(|n| n.clamp(1, Semaphore::MAX_PERMITS))
    }
}
