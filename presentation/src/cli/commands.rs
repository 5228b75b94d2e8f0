//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use patterns_domain::AmbiguityPolicy;
use std::path::PathBuf;

/// Output format for pattern results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aggregated result plus every raw response and timing
    Full,
    /// Only the aggregated result
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for patterns_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl From<patterns_domain::OutputFormat> for OutputFormat {
    fn from(format: patterns_domain::OutputFormat) -> Self {
        match format {
            patterns_domain::OutputFormat::Full => Self::Full,
            patterns_domain::OutputFormat::Summary => Self::Summary,
            patterns_domain::OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for parallel-patterns
#[derive(Parser, Debug)]
#[command(name = "parallel-patterns")]
#[command(author, version, about = "Sectioning and voting over a local Ollama model")]
#[command(long_about = r#"
parallel-patterns fans prompts out to a local Ollama server concurrently and
aggregates the answers with one of two patterns:

  section   Split a task into independent sections, generate them all at
            once and assemble them in a fixed order (an AI newsletter by
            default).
  vote      Ask several differently-worded prompts to classify the same text
            and take the majority label (sentiment by default).

Configuration files are loaded from (in priority order):
1. PATTERNS_* environment variables
2. --config <path>       Explicit config file
3. ./patterns.toml       Project-level config
4. ~/.config/parallel-patterns/config.toml   Global config

Example:
  parallel-patterns section "multimodal models"
  parallel-patterns vote "The update fixed everything, great work!"
  parallel-patterns --model llama3.2 --max-concurrency 2 -o full section robotics
  parallel-patterns check
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Ollama server URL
    #[arg(long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Model used for every request
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Maximum number of requests in flight (default: all at once)
    #[arg(long, value_name = "N", global = true)]
    pub max_concurrency: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate every section of a document about TOPIC in parallel
    Section {
        /// What the sections are written about
        topic: String,
    },

    /// Classify TEXT with several voter prompts and take the majority
    Vote {
        /// Text to classify
        text: String,

        /// How to treat answers naming several labels (first_match, reject)
        #[arg(long, value_name = "POLICY")]
        ambiguity: Option<AmbiguityPolicy>,
    },

    /// Test the connection to the Ollama server and list installed models
    Check,
}
