//! Vote tally types and majority selection

use super::label::{AmbiguityPolicy, LabelExtraction, LabelSet, extract_label};
use crate::dispatch::{CompletionResult, RequestId};
use serde::{Deserialize, Serialize};

/// One voter's contribution, kept for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Voter identifier (e.g. `voter-2`)
    pub voter: RequestId,
    /// Raw response text
    pub raw: String,
    /// Extracted label, `None` if the ballot was not counted
    pub label: Option<String>,
    /// Whether the request itself succeeded
    pub success: bool,
    /// Why the ballot was not counted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_reason: Option<String>,
}

impl Ballot {
    pub fn is_counted(&self) -> bool {
        self.label.is_some()
    }
}

/// Vote count for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Aggregated result of a voting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Winning label, `None` when no ballot was counted
    pub chosen: Option<String>,
    /// Count for every label in label-set order, zeros included
    pub counts: Vec<LabelCount>,
    /// Number of ballots that contributed a label
    pub votes_counted: usize,
    /// Whether the winner was decided by tie-break
    pub tie: bool,
    /// Every ballot in voter order
    pub ballots: Vec<Ballot>,
}

impl VoteTally {
    /// Count for `label` (case-insensitive), 0 for unknown labels
    pub fn count(&self, label: &str) -> usize {
        let upper = label.to_uppercase();
        self.counts
            .iter()
            .find(|c| c.label == upper)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Fraction of counted votes for `label` (0.0 to 1.0)
    pub fn share(&self, label: &str) -> f64 {
        if self.votes_counted == 0 {
            0.0
        } else {
            self.count(label) as f64 / self.votes_counted as f64
        }
    }

    pub fn has_winner(&self) -> bool {
        self.chosen.is_some()
    }

    /// Check if every counted ballot agreed
    pub fn is_unanimous(&self) -> bool {
        self.votes_counted > 0 && self.counts.iter().any(|c| c.count == self.votes_counted)
    }

    /// Ballots excluded from the count
    pub fn excluded(&self) -> impl Iterator<Item = &Ballot> {
        self.ballots.iter().filter(|b| !b.is_counted())
    }

    /// Generate a compact vote summary (e.g. "[PPN?]")
    ///
    /// One character per ballot: the first letter of its label, or `?` if it
    /// was not counted.
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for ballot in &self.ballots {
            summary.push(
                ballot
                    .label
                    .as_deref()
                    .and_then(|l| l.chars().next())
                    .unwrap_or('?'),
            );
        }
        summary.push(']');
        summary
    }
}

/// Reduce voter results to a tally
///
/// Failed requests and responses without a usable label are kept as ballots
/// but excluded from the counts. The label with the highest count wins; ties
/// go to the label defined earliest in `labels`.
pub fn tally_votes(
    results: Vec<CompletionResult>,
    labels: &LabelSet,
    policy: AmbiguityPolicy,
) -> VoteTally {
    let mut counts: Vec<LabelCount> = labels
        .labels()
        .iter()
        .map(|l| LabelCount {
            label: l.clone(),
            count: 0,
        })
        .collect();

    let ballots: Vec<Ballot> = results
        .into_iter()
        .map(|result| {
            if !result.success {
                let reason = result.error.unwrap_or_else(|| "request failed".to_string());
                return Ballot {
                    voter: result.id,
                    raw: result.text,
                    label: None,
                    success: false,
                    excluded_reason: Some(reason),
                };
            }

            let (label, excluded_reason) = match extract_label(&result.text, labels, policy) {
                LabelExtraction::Matched(label) => (Some(label), None),
                LabelExtraction::Ambiguous(found) => {
                    (None, Some(format!("ambiguous: {}", found.join(", "))))
                }
                LabelExtraction::Unrecognized => (None, Some("unrecognized response".to_string())),
            };

            Ballot {
                voter: result.id,
                raw: result.text,
                label,
                success: true,
                excluded_reason,
            }
        })
        .collect();

    for label in ballots.iter().filter_map(|b| b.label.as_deref()) {
        if let Some(entry) = counts.iter_mut().find(|c| c.label == label) {
            entry.count += 1;
        }
    }

    let votes_counted: usize = counts.iter().map(|c| c.count).sum();

    // Strict comparison keeps the earliest label among equals
    let mut best: Option<&LabelCount> = None;
    for entry in &counts {
        if entry.count > best.map(|b| b.count).unwrap_or(0) {
            best = Some(entry);
        }
    }

    let chosen = best.map(|b| b.label.clone());
    let tie = match best {
        Some(b) => counts.iter().filter(|c| c.count == b.count).count() > 1,
        None => false,
    };

    VoteTally {
        chosen,
        counts,
        votes_counted,
        tie,
        ballots,
    }
}
