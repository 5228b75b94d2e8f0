//! Console output formatter for sectioning and voting results

use crate::cli::commands::OutputFormat;
use chrono::NaiveDate;
use colored::Colorize;
use patterns_application::{RunSectioningOutput, RunVotingOutput};
use patterns_domain::{Ballot, Model, SectionedDocument, VoteTally};
use serde_json::json;
use std::time::Duration;

/// Shown when no voter produced a usable label
pub const UNDETERMINED: &str = "UNABLE TO DETERMINE";

const BAR_WIDTH: usize = 30;

/// Formats pattern results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this process prints
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    // ==================== Sectioning ====================

    /// Render the document as a markdown newsletter
    ///
    /// Sections appear in plan order with `---` between them; failed
    /// sections show their placeholder.
    pub fn newsletter(title: &str, document: &SectionedDocument, date: NaiveDate) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}: {}\n", title, document.topic));
        output.push_str(&format!("*Generated on {}*\n\n---\n\n", date.format("%B %d, %Y")));
        output.push_str(&document.to_markdown());
        output.push_str("\n\n---\n\n");
        output.push_str(
            "*Each section of this document was generated concurrently by a separate request \
to the model.*\n",
        );

        output
    }

    /// Format a sectioning run in the requested format
    pub fn format_sectioning(
        format: OutputFormat,
        title: &str,
        result: &RunSectioningOutput,
        date: NaiveDate,
    ) -> String {
        match format {
            OutputFormat::Summary => Self::sectioning_summary(title, result, date),
            OutputFormat::Full => Self::sectioning_full(title, result, date),
            OutputFormat::Json => Self::sectioning_json(title, result, date),
        }
    }

    fn sectioning_summary(title: &str, result: &RunSectioningOutput, date: NaiveDate) -> String {
        let document = &result.document;
        let mut output = Self::newsletter(title, document, date);

        output.push('\n');
        if document.is_empty_result() {
            output.push_str(&format!(
                "{} No section was generated. Is the model reachable?\n",
                "x".red().bold()
            ));
        } else {
            output.push_str(&format!(
                "{} Generated {}/{} sections in {}\n",
                "v".green().bold(),
                document.successful_count(),
                document.sections.len(),
                Self::seconds(result.elapsed)
            ));
        }

        output
    }

    fn sectioning_full(title: &str, result: &RunSectioningOutput, date: NaiveDate) -> String {
        let mut output = Self::sectioning_summary(title, result, date);

        output.push_str(&Self::section_header("Raw section outputs"));
        for entry in &result.document.sections {
            if entry.success {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", entry.label).yellow().bold(),
                    entry.raw
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", entry.label).red().bold(),
                    entry.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }
        output.push_str(&Self::footer());

        output
    }

    fn sectioning_json(title: &str, result: &RunSectioningOutput, date: NaiveDate) -> String {
        let value = json!({
            "title": title,
            "generated_on": date.to_string(),
            "elapsed_secs": result.elapsed.as_secs_f64(),
            "topic": result.document.topic,
            "successful": result.document.successful_count(),
            "sections": result.document.sections,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    // ==================== Voting ====================

    /// Format a voting run in the requested format
    pub fn format_voting(format: OutputFormat, result: &RunVotingOutput) -> String {
        match format {
            OutputFormat::Summary => Self::voting_summary(result),
            OutputFormat::Full => Self::voting_full(result),
            OutputFormat::Json => Self::voting_json(result),
        }
    }

    fn voting_summary(result: &RunVotingOutput) -> String {
        let tally = &result.tally;
        let mut output = String::new();

        output.push_str(&Self::header("Voting Result"));
        output.push('\n');

        let verdict = match tally.chosen.as_deref() {
            Some(label) => label.green().bold(),
            None => UNDETERMINED.red().bold(),
        };
        output.push_str(&format!("\n{} {}", "Final label:".cyan().bold(), verdict));
        if tally.tie {
            output.push_str(&format!(" {}", "(tie, earliest label wins)".dimmed()));
        }
        output.push('\n');

        output.push_str(&Self::section_header("Individual votes"));
        for (i, ballot) in tally.ballots.iter().enumerate() {
            output.push_str(&format!("  Voter {}: {}\n", i + 1, Self::ballot_label(ballot)));
        }

        output.push_str(&Self::section_header("Vote distribution"));
        output.push_str(&Self::distribution(tally));

        if tally.votes_counted == 0 {
            output.push_str(&format!(
                "\n{} No vote was counted. Is the model reachable?\n",
                "x".red().bold()
            ));
        } else {
            output.push_str(&format!(
                "\n{} {} of {} votes counted in {}\n",
                "v".green().bold(),
                tally.votes_counted,
                tally.ballots.len(),
                Self::seconds(result.elapsed)
            ));
        }

        output
    }

    fn voting_full(result: &RunVotingOutput) -> String {
        let mut output = Self::voting_summary(result);

        output.push_str(&Self::section_header("Raw responses"));
        for ballot in &result.tally.ballots {
            let heading = format!("── {} ──", ballot.voter);
            if ballot.success {
                output.push_str(&format!("\n{}\n{}\n", heading.yellow().bold(), ballot.raw));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    heading.red().bold(),
                    ballot.excluded_reason.as_deref().unwrap_or("Unknown")
                ));
            }
        }
        output.push_str(&Self::footer());

        output
    }

    fn voting_json(result: &RunVotingOutput) -> String {
        let value = json!({
            "chosen": result.tally.chosen,
            "tie": result.tally.tie,
            "votes_counted": result.tally.votes_counted,
            "counts": result.tally.counts,
            "ballots": result.tally.ballots,
            "summary": result.tally.vote_summary(),
            "elapsed_secs": result.elapsed.as_secs_f64(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn ballot_label(ballot: &Ballot) -> String {
        match (&ballot.label, &ballot.excluded_reason) {
            (Some(label), _) => label.bold().to_string(),
            (None, Some(reason)) => format!("{} ({})", "excluded".yellow(), reason),
            (None, None) => "excluded".yellow().to_string(),
        }
    }

    /// One line per label: count, share of counted votes, and a bar
    pub fn distribution(tally: &VoteTally) -> String {
        if tally.votes_counted == 0 {
            return format!("  {}\n", "No votes counted".dimmed());
        }

        let width = tally
            .counts
            .iter()
            .map(|c| c.label.len())
            .max()
            .unwrap_or(0);

        tally
            .counts
            .iter()
            .map(|c| {
                let share = tally.share(&c.label);
                let filled = (share * BAR_WIDTH as f64).round() as usize;
                format!(
                    "  {:<width$}  {}/{} ({:>3.0}%) {}{}\n",
                    c.label,
                    c.count,
                    tally.votes_counted,
                    share * 100.0,
                    "█".repeat(filled).cyan(),
                    "░".repeat(BAR_WIDTH - filled).dimmed(),
                    width = width
                )
            })
            .collect()
    }

    // ==================== Connection check ====================

    /// Format the result of a successful connection check
    pub fn format_check(url: &str, configured: &Model, models: &[Model]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} Ollama is running at {}\n", "v".green().bold(), url));

        if models.is_empty() {
            output.push_str(&format!("{}\n", "No models installed.".yellow()));
        } else {
            output.push_str(&format!("\n{}\n", "Available models:".cyan().bold()));
            for model in models {
                output.push_str(&format!("  - {}\n", model));
            }
        }

        let installed = models
            .iter()
            .any(|m| m == configured || m.family() == configured.as_str());
        if !installed {
            output.push_str(&format!(
                "\n{} configured model '{}' is not installed (try `ollama pull {}`)\n",
                "!".yellow().bold(),
                configured,
                configured
            ));
        }

        output
    }

    // ==================== Helpers ====================

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn seconds(elapsed: Duration) -> String {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}
