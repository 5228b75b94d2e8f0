//! Run Voting use case
//!
//! Sends several variant prompts over the same text and takes the majority
//! label.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::dispatch::{DispatchError, RequestDispatcher};
use patterns_domain::{
    AmbiguityPolicy, DomainError, LabelSet, PromptRequest, PromptTemplate, RequestId, Subject,
    VoteTally, defaults, tally_votes,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur before any voter is asked
#[derive(Error, Debug)]
pub enum RunVotingError {
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Input for the RunVoting use case
#[derive(Debug, Clone)]
pub struct RunVotingInput {
    /// Text every voter classifies
    pub text: Subject,
    /// One prompt per voter, each referencing `{text}`
    pub prompts: Vec<PromptTemplate>,
    /// Allowed labels in tie-break priority order
    pub labels: LabelSet,
    /// How to treat responses naming more than one label
    pub policy: AmbiguityPolicy,
}

impl RunVotingInput {
    pub fn new(text: Subject, prompts: Vec<PromptTemplate>, labels: LabelSet) -> Self {
        Self {
            text,
            prompts,
            labels,
            policy: AmbiguityPolicy::default(),
        }
    }

    /// Validate raw text against the built-in sentiment voters
    pub fn sentiment(text: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::new(
            Subject::try_new(text)?,
            defaults::sentiment_prompts(),
            defaults::sentiment_labels(),
        ))
    }

    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.prompts.is_empty() {
            return Err(DomainError::NoVoters);
        }
        for prompt in &self.prompts {
            prompt.require_placeholder(PromptTemplate::TEXT)?;
        }
        Ok(())
    }

    fn requests(&self) -> Vec<PromptRequest> {
        self.prompts
            .iter()
            .enumerate()
            .map(|(i, prompt)| {
                PromptRequest::new(
                    RequestId::voter(i),
                    prompt.render(PromptTemplate::TEXT, &self.text),
                )
            })
            .collect()
    }
}

/// Output of the RunVoting use case
#[derive(Debug, Clone)]
pub struct RunVotingOutput {
    pub tally: VoteTally,
    /// Wall time from first request to last response
    pub elapsed: Duration,
}

/// Use case for the voting pattern
pub struct RunVotingUseCase<G: LlmGateway + 'static> {
    dispatcher: RequestDispatcher<G>,
}

impl<G: LlmGateway + 'static> RunVotingUseCase<G> {
    pub fn new(dispatcher: RequestDispatcher<G>) -> Self {
        Self { dispatcher }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunVotingInput) -> Result<RunVotingOutput, RunVotingError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Voters that fail or answer outside the label set are excluded from
    /// the tally, never counted as an extra label.
    pub async fn execute_with_progress(
        &self,
        input: RunVotingInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunVotingOutput, RunVotingError> {
        input.validate()?;

        info!(
            voters = input.prompts.len(),
            labels = input.labels.len(),
            policy = %input.policy,
            "Starting voting"
        );

        let started = Instant::now();
        let results = self
            .dispatcher
            .dispatch_with_progress(input.requests(), progress)
            .await?;
        let elapsed = started.elapsed();

        let tally = tally_votes(results, &input.labels, input.policy);

        match &tally.chosen {
            Some(label) => info!(
                chosen = %label,
                votes_counted = tally.votes_counted,
                tie = tally.tie,
                elapsed_ms = elapsed.as_millis() as u64,
                "Voting complete"
            ),
            None => warn!("No votes counted"),
        }

        Ok(RunVotingOutput { tally, elapsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::ScriptedGateway;
    use std::sync::Arc;

    fn use_case(gateway: ScriptedGateway) -> RunVotingUseCase<ScriptedGateway> {
        RunVotingUseCase::new(RequestDispatcher::new(
            Arc::new(gateway),
            DispatchConfig::default(),
        ))
    }

    /// Voter prompts that tag themselves so the gateway can tell them apart
    fn tagged_input(labels: &[&str]) -> RunVotingInput {
        let prompts = (1..=3)
            .map(|i| PromptTemplate::new(format!("[voter {}] classify: {{text}}", i)))
            .collect();
        RunVotingInput::new(
            Subject::try_new("I love this product").unwrap(),
            prompts,
            LabelSet::new(labels.iter().copied()).unwrap(),
        )
    }

    fn sentiment_input() -> RunVotingInput {
        tagged_input(&["POSITIVE", "NEGATIVE", "NEUTRAL"])
    }

    #[tokio::test]
    async fn test_majority_wins() {
        let gateway = ScriptedGateway::new()
            .reply("[voter 1]", "POSITIVE")
            .reply("[voter 2]", "positive.")
            .reply("[voter 3]", "NEGATIVE");

        let tally = use_case(gateway)
            .execute(sentiment_input())
            .await
            .unwrap()
            .tally;

        assert_eq!(tally.chosen.as_deref(), Some("POSITIVE"));
        assert_eq!(tally.count("POSITIVE"), 2);
        assert_eq!(tally.count("NEGATIVE"), 1);
        assert_eq!(tally.count("NEUTRAL"), 0);
        assert!(!tally.tie);
    }

    #[tokio::test]
    async fn test_three_way_tie_goes_to_first_label() {
        for _ in 0..5 {
            let gateway = ScriptedGateway::new()
                .reply_after("[voter 1]", 30, "NEUTRAL")
                .reply_after("[voter 2]", 0, "NEGATIVE")
                .reply_after("[voter 3]", 15, "POSITIVE");

            let tally = use_case(gateway)
                .execute(sentiment_input())
                .await
                .unwrap()
                .tally;

            assert_eq!(tally.chosen.as_deref(), Some("POSITIVE"));
            assert!(tally.tie);
        }
    }

    #[tokio::test]
    async fn test_empty_response_is_excluded() {
        let gateway = ScriptedGateway::new()
            .reply("[voter 1]", "POSITIVE")
            .reply("[voter 2]", "")
            .reply("[voter 3]", "POSITIVE");

        let tally = use_case(gateway)
            .execute(sentiment_input())
            .await
            .unwrap()
            .tally;

        assert_eq!(tally.chosen.as_deref(), Some("POSITIVE"));
        assert_eq!(tally.count("POSITIVE"), 2);
        assert_eq!(tally.count("NEGATIVE"), 0);
        assert_eq!(tally.count("NEUTRAL"), 0);
        assert_eq!(tally.votes_counted, 2);
        assert_eq!(tally.ballots.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_voter_is_excluded() {
        let gateway = ScriptedGateway::new()
            .reply("[voter 1]", "NEGATIVE")
            .fail("[voter 2]", GatewayError::ConnectionError("reset".into()))
            .reply("[voter 3]", "The sentiment is NEUTRAL");

        let tally = use_case(gateway)
            .execute(sentiment_input())
            .await
            .unwrap()
            .tally;

        assert_eq!(tally.votes_counted, 2);
        assert_eq!(tally.chosen.as_deref(), Some("NEGATIVE"));
        assert!(tally.tie);

        let failed = &tally.ballots[1];
        assert_eq!(failed.voter.as_str(), "voter-2");
        assert!(!failed.is_counted());
    }

    #[tokio::test]
    async fn test_all_voters_fail() {
        let gateway = ScriptedGateway::new().fail_all(GatewayError::ConnectionError(
            "connection refused".into(),
        ));

        let tally = use_case(gateway)
            .execute(sentiment_input())
            .await
            .unwrap()
            .tally;

        assert_eq!(tally.chosen, None);
        assert_eq!(tally.votes_counted, 0);
        assert_eq!(tally.ballots.len(), 3);
        assert!(tally.counts.iter().all(|c| c.count == 0));
    }

    #[tokio::test]
    async fn test_reject_policy_excludes_ambiguous_answers() {
        let gateway = ScriptedGateway::new()
            .reply("[voter 1]", "POSITIVE or NEGATIVE")
            .reply("[voter 2]", "NEGATIVE")
            .reply("[voter 3]", "NEGATIVE, not POSITIVE");

        let input = sentiment_input().with_policy(AmbiguityPolicy::Reject);
        let tally = use_case(gateway).execute(input).await.unwrap().tally;

        assert_eq!(tally.votes_counted, 1);
        assert_eq!(tally.chosen.as_deref(), Some("NEGATIVE"));
    }

    #[tokio::test]
    async fn test_ballots_follow_voter_order() {
        let gateway = ScriptedGateway::new()
            .reply_after("[voter 1]", 40, "YES")
            .reply_after("[voter 2]", 20, "NO")
            .reply_after("[voter 3]", 0, "YES");

        let tally = use_case(gateway)
            .execute(tagged_input(&["yes", "no"]))
            .await
            .unwrap()
            .tally;

        let voters: Vec<_> = tally.ballots.iter().map(|b| b.voter.as_str()).collect();
        assert_eq!(voters, vec!["voter-1", "voter-2", "voter-3"]);
        assert_eq!(tally.chosen.as_deref(), Some("YES"));
    }

    #[tokio::test]
    async fn test_text_rendered_into_voter_prompts() {
        let gateway = Arc::new(ScriptedGateway::new().reply("classify", "NEUTRAL"));
        let use_case = RunVotingUseCase::new(RequestDispatcher::new(
            Arc::clone(&gateway),
            DispatchConfig::default(),
        ));

        use_case.execute(sentiment_input()).await.unwrap();

        let prompts = gateway.prompts_seen();
        assert_eq!(prompts.len(), 3);
        assert!(prompts.iter().all(|p| p.ends_with("classify: I love this product")));
    }

    #[tokio::test]
    async fn test_no_voters_rejected() {
        let mut input = sentiment_input();
        input.prompts.clear();

        let result = use_case(ScriptedGateway::new()).execute(input).await;

        assert!(matches!(
            result,
            Err(RunVotingError::Domain(DomainError::NoVoters))
        ));
    }

    #[tokio::test]
    async fn test_prompt_without_placeholder_rejected() {
        let mut input = sentiment_input();
        input.prompts.push(PromptTemplate::new("Classify something"));

        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunVotingUseCase::new(RequestDispatcher::new(
            Arc::clone(&gateway),
            DispatchConfig::default(),
        ));
        let result = use_case.execute(input).await;

        assert!(matches!(
            result,
            Err(RunVotingError::Domain(DomainError::MissingPlaceholder(_)))
        ));
        assert!(gateway.prompts_seen().is_empty());
    }

    #[test]
    fn test_sentiment_defaults() {
        let input = RunVotingInput::sentiment("great").unwrap();
        assert_eq!(input.prompts.len(), 3);
        assert_eq!(input.labels.labels()[0], "POSITIVE");
        assert_eq!(input.policy, AmbiguityPolicy::FirstMatch);
    }
}
