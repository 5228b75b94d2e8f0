//! Run Sectioning use case
//!
//! Renders one prompt per planned section, dispatches them all at once and
//! stitches the responses back together in plan order.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::dispatch::{DispatchError, RequestDispatcher};
use patterns_domain::{
    DomainError, SectionPlan, SectionedDocument, Subject, aggregate_sections, defaults,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur before any section is requested
#[derive(Error, Debug)]
pub enum RunSectioningError {
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Input for the RunSectioning use case
#[derive(Debug, Clone)]
pub struct RunSectioningInput {
    /// What every section is written about
    pub topic: Subject,
    /// Sections in canonical order
    pub plan: SectionPlan,
}

impl RunSectioningInput {
    pub fn new(topic: Subject, plan: SectionPlan) -> Self {
        Self { topic, plan }
    }

    /// Validate a raw topic against the built-in newsletter plan
    pub fn newsletter(topic: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::new(Subject::try_new(topic)?, defaults::newsletter_plan()))
    }
}

/// Output of the RunSectioning use case
#[derive(Debug, Clone)]
pub struct RunSectioningOutput {
    pub document: SectionedDocument,
    /// Wall time from first request to last response
    pub elapsed: Duration,
}

/// Use case for the sectioning pattern
pub struct RunSectioningUseCase<G: LlmGateway + 'static> {
    dispatcher: RequestDispatcher<G>,
}

impl<G: LlmGateway + 'static> RunSectioningUseCase<G> {
    pub fn new(dispatcher: RequestDispatcher<G>) -> Self {
        Self { dispatcher }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunSectioningInput,
    ) -> Result<RunSectioningOutput, RunSectioningError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Never fails because of the endpoint: failed sections show their
    /// placeholder in the returned document.
    pub async fn execute_with_progress(
        &self,
        input: RunSectioningInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunSectioningOutput, RunSectioningError> {
        info!(
            topic = %input.topic,
            sections = input.plan.len(),
            "Starting sectioning"
        );

        let started = Instant::now();
        let requests = input.plan.requests(&input.topic);
        let results = self
            .dispatcher
            .dispatch_with_progress(requests, progress)
            .await?;
        let elapsed = started.elapsed();

        let document = aggregate_sections(&input.plan, &input.topic, results);

        if document.is_empty_result() {
            warn!("No section produced content");
        } else {
            info!(
                successful = document.successful_count(),
                total = document.sections.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Sectioning complete"
            );
        }

        Ok(RunSectioningOutput { document, elapsed })
    }
}
