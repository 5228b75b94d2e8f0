//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for pattern results
///
/// This is a domain concept representing how an outcome should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aggregated result plus every raw response and timing
    Full,
    /// Only the aggregated result (default)
    Summary,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Summary
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown output format: {}. Valid: full, summary, json",
                other
            )),
        }
    }
}
