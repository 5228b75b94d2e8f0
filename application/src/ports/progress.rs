//! Progress notification port
//!
//! Defines the interface for reporting progress while a fan-out is in flight.

use patterns_domain::RequestId;

/// Callback for progress updates during dispatch
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain lines, nothing).
/// Completion callbacks arrive in completion order, not submission order.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any request is issued
    fn on_dispatch_start(&self, total_requests: usize);

    /// Called when a single request resolves
    fn on_request_complete(&self, id: &RequestId, success: bool);

    /// Called once after every request has resolved
    fn on_dispatch_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _total_requests: usize) {}
    fn on_request_complete(&self, _id: &RequestId, _success: bool) {}
    fn on_dispatch_complete(&self) {}
}
