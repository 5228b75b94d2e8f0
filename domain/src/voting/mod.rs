//! Voting pattern
//!
//! Every voter response is reduced to at most one label from a fixed
//! [`LabelSet`] by [`extract_label`]; [`tally_votes`] then counts the labels
//! and picks the most frequent one.
//!
//! # Tie-break
//!
//! When several labels share the highest count, the label defined earliest in
//! the [`LabelSet`] wins and [`VoteTally::tie`] is set. The result is therefore
//! identical for identical input, regardless of response arrival order.

mod label;
mod tally;

pub use label::{AmbiguityPolicy, LabelExtraction, LabelSet, extract_label};
pub use tally::{Ballot, LabelCount, VoteTally, tally_votes};
