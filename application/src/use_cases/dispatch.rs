//! Request dispatcher
//!
//! Fans a batch of prompts out to the gateway concurrently and waits for
//! every request to resolve before returning.
//!
//! ```text
//!   PromptRequest[0..N] ──spawn──▶ JoinSet ──join_next──▶ slots[index]
//!                                    │ (optional Semaphore)
//!                                    ▼
//!                               LlmGateway::generate
//! ```
//!
//! Each task catches its own failure into a [`CompletionResult`], so one bad
//! request never cancels its siblings. Results are returned in submission
//! order even though they complete in any order.

use crate::config::DispatchConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use patterns_domain::{CompletionResult, PromptRequest, RequestId};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that prevent a batch from being dispatched at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Duplicate request identifier: {0}")]
    DuplicateIdentifier(String),
}

/// Concurrent fan-out over a single gateway
pub struct RequestDispatcher<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    config: DispatchConfig,
}

impl<G: LlmGateway + 'static> RequestDispatcher<G> {
    pub fn new(gateway: Arc<G>, config: DispatchConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatch with default (no-op) progress
    pub async fn dispatch(
        &self,
        requests: Vec<PromptRequest>,
    ) -> Result<Vec<CompletionResult>, DispatchError> {
        self.dispatch_with_progress(requests, &NoProgress).await
    }

    /// Issue every request concurrently and collect one result per request
    ///
    /// The returned vector has the same length and order as `requests`.
    /// Identifiers must be unique within the batch.
    pub async fn dispatch_with_progress(
        &self,
        requests: Vec<PromptRequest>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<CompletionResult>, DispatchError> {
        Self::check_unique(&requests)?;

        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let total = requests.len();
        let limit = self.config.concurrency_limit();
        info!(
            total,
            model = %self.config.model,
            max_concurrency = ?limit,
            "Dispatching requests"
        );
        progress.on_dispatch_start(total);

        // A cap at or above the batch size never blocks
        let semaphore = limit
            .filter(|&n| n < total)
            .map(|n| Arc::new(Semaphore::new(n)));
        let ids: Vec<RequestId> = requests.iter().map(|r| r.id.clone()).collect();
        let mut slots: Vec<Option<CompletionResult>> = vec![None; total];

        let mut join_set = JoinSet::new();

        for (index, request) in requests.into_iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let model = self.config.model.clone();
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                // Held until the request resolves; the semaphore is never closed
                let _permit = match semaphore {
                    Some(sem) => Some(sem.acquire_owned().await),
                    None => None,
                };
                let result = gateway.generate(&model, &request.prompt).await;
                (index, request.id, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, id, Ok(text))) => {
                    debug!(id = %id, bytes = text.len(), "Request completed");
                    progress.on_request_complete(&id, true);
                    slots[index] = Some(CompletionResult::success(id, text));
                }
                Ok((index, id, Err(e))) => {
                    warn!(id = %id, error = %e, "Request failed");
                    progress.on_request_complete(&id, false);
                    slots[index] = Some(CompletionResult::failure(id, e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        let results: Vec<CompletionResult> = slots
            .into_iter()
            .zip(ids)
            .map(|(slot, id)| match slot {
                Some(result) => result,
                None => {
                    progress.on_request_complete(&id, false);
                    CompletionResult::failure(id, "request task did not complete")
                }
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(total, succeeded, "All requests resolved");
        progress.on_dispatch_complete();

        Ok(results)
    }

    fn check_unique(requests: &[PromptRequest]) -> Result<(), DispatchError> {
        let mut seen = HashSet::new();
        for request in requests {
            if !seen.insert(&request.id) {
                return Err(DispatchError::DuplicateIdentifier(request.id.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{RecordingProgress, ScriptedGateway};
    use patterns_domain::Model;

    fn requests(prompts: &[&str]) -> Vec<PromptRequest> {
        prompts
            .iter()
            .map(|p| PromptRequest::new(format!("id-{}", p), *p))
            .collect()
    }

    #[tokio::test]
    async fn test_one_result_per_request_in_submission_order() {
        // Later requests finish first
        let gateway = ScriptedGateway::new()
            .reply_after("a", 60, "A")
            .reply_after("b", 30, "B")
            .reply_after("c", 0, "C");
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());

        let results = dispatcher.dispatch(requests(&["a", "b", "c"])).await.unwrap();

        assert_eq!(results.len(), 3);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["id-a", "id-b", "id-c"]);
        let texts: Vec<_> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_siblings() {
        let gateway = ScriptedGateway::new()
            .reply("a", "A")
            .fail("b", GatewayError::HttpStatus {
                status: 500,
                message: "boom".into(),
            })
            .reply_after("c", 40, "C");
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());

        let results = dispatcher.dispatch(requests(&["a", "b", "c"])).await.unwrap();

        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].error.as_deref(), Some("Status 500: boom"));
        assert!(results[2].success);
        assert_eq!(results[2].text, "C");
    }

    #[tokio::test]
    async fn test_all_failures_still_return_every_result() {
        let gateway = ScriptedGateway::new().fail_all(GatewayError::ConnectionError(
            "connection refused".into(),
        ));
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());

        let results = dispatcher
            .dispatch(requests(&["a", "b", "c", "d"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| !r.success && r.error.is_some()));
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_failure() {
        let gateway = ScriptedGateway::new().reply("a", "A").panic_on("b");
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());

        let results = dispatcher.dispatch(requests(&["a", "b"])).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[1].id.as_str(), "id-b");
        assert_eq!(
            results[1].error.as_deref(),
            Some("request task did not complete")
        );
    }

    #[tokio::test]
    async fn test_unbounded_issues_everything_at_once() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply_after("a", 50, "A")
                .reply_after("b", 50, "B")
                .reply_after("c", 50, "C")
                .reply_after("d", 50, "D"),
        );
        let dispatcher = RequestDispatcher::new(Arc::clone(&gateway), DispatchConfig::default());

        dispatcher
            .dispatch(requests(&["a", "b", "c", "d"]))
            .await
            .unwrap();

        assert_eq!(gateway.max_in_flight(), 4);
    }

    #[tokio::test]
    async fn test_concurrency_cap_is_respected() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply_after("a", 20, "A")
                .reply_after("b", 20, "B")
                .reply_after("c", 20, "C")
                .reply_after("d", 20, "D")
                .reply_after("e", 20, "E"),
        );
        let config = DispatchConfig::default().with_max_concurrency(Some(2));
        let dispatcher = RequestDispatcher::new(Arc::clone(&gateway), config);

        let results = dispatcher
            .dispatch(requests(&["a", "b", "c", "d", "e"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.success));
        assert!(gateway.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_cap_of_one_serializes_requests() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply_after("a", 10, "A")
                .reply_after("b", 10, "B")
                .reply_after("c", 10, "C"),
        );
        let config = DispatchConfig::default().with_max_concurrency(Some(1));
        let dispatcher = RequestDispatcher::new(Arc::clone(&gateway), config);

        let results = dispatcher.dispatch(requests(&["a", "b", "c"])).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(gateway.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_cap_larger_than_semaphore_limit() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply_after("a", 20, "A")
                .reply_after("b", 20, "B"),
        );
        let config = DispatchConfig::default().with_max_concurrency(Some(usize::MAX));
        let dispatcher = RequestDispatcher::new(Arc::clone(&gateway), config);

        let results = dispatcher.dispatch(requests(&["a", "b"])).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(gateway.max_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_identifiers_rejected() {
        let gateway = ScriptedGateway::new().reply("a", "A");
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());

        let batch = vec![
            PromptRequest::new("same", "a"),
            PromptRequest::new("same", "a"),
        ];
        let result = dispatcher.dispatch(batch).await;

        assert_eq!(
            result,
            Err(DispatchError::DuplicateIdentifier("same".into()))
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let dispatcher =
            RequestDispatcher::new(Arc::new(ScriptedGateway::new()), DispatchConfig::default());
        let progress = RecordingProgress::default();

        let results = dispatcher
            .dispatch_with_progress(vec![], &progress)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(progress.started(), None);
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let gateway = ScriptedGateway::new()
            .reply("a", "A")
            .fail("b", GatewayError::Other("nope".into()));
        let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchConfig::default());
        let progress = RecordingProgress::default();

        dispatcher
            .dispatch_with_progress(requests(&["a", "b"]), &progress)
            .await
            .unwrap();

        assert_eq!(progress.started(), Some(2));
        let mut completed = progress.completed();
        completed.sort();
        assert_eq!(
            completed,
            vec![("id-a".to_string(), true), ("id-b".to_string(), false)]
        );
        assert!(progress.finished());
    }

    #[tokio::test]
    async fn test_dispatchers_keep_their_own_model() {
        let gateway = Arc::new(ScriptedGateway::new().reply("a", "A"));
        let first = RequestDispatcher::new(
            Arc::clone(&gateway),
            DispatchConfig::new(Model::new("gemma3")),
        );
        let second = RequestDispatcher::new(
            Arc::clone(&gateway),
            DispatchConfig::new(Model::new("llama3.2")),
        );

        first.dispatch(requests(&["a"])).await.unwrap();
        second.dispatch(requests(&["a"])).await.unwrap();
        first.dispatch(requests(&["a"])).await.unwrap();

        assert_eq!(
            gateway.models_seen(),
            vec![
                Model::new("gemma3"),
                Model::new("llama3.2"),
                Model::new("gemma3")
            ]
        );
    }
}
