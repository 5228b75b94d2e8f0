//! CLI entrypoint for parallel-patterns
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use patterns_application::{
    NoProgress, ProgressNotifier, RequestDispatcher, RunSectioningInput, RunSectioningUseCase,
    RunVotingInput, RunVotingUseCase,
};
use patterns_domain::{Model, Subject};
use patterns_infrastructure::{ConfigLoader, FileConfig, OllamaGateway};
use patterns_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting parallel-patterns");

    ensure_config_exists(&cli)?;

    let config = load_config(&cli)?;

    if cli.show_config {
        if !cli.no_config {
            ConfigLoader::print_config_sources(cli.config.as_ref());
            println!();
        }
        println!("Effective configuration:\n");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config error: {}", issue);
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    ConsoleFormatter::set_color(config.output.color);

    let format: OutputFormat = cli
        .output
        .or(config.output.format.map(Into::into))
        .unwrap_or(OutputFormat::Summary);

    let command = match cli.command.clone() {
        Some(command) => command,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    // === Dependency Injection ===
    let model = config.endpoint.to_model();
    let ollama = config.endpoint.to_ollama_config();
    let gateway = Arc::new(OllamaGateway::new(ollama.clone())?);
    let dispatch = config.dispatch.to_dispatch_config(model.clone());

    let show_progress = !cli.quiet && config.output.show_progress && format != OutputFormat::Json;

    match command {
        Command::Check => run_check(gateway.as_ref(), &ollama.base_url, &model).await,

        Command::Section { topic } => {
            let input = RunSectioningInput::new(
                Subject::try_new(topic)?,
                config.sectioning.to_section_plan()?,
            );

            if show_progress {
                print_banner("Sectioning", input.topic.content(), &model, &ollama.base_url);
            }

            let use_case = RunSectioningUseCase::new(RequestDispatcher::new(gateway, dispatch));
            let progress = progress_notifier(show_progress, "Sectioning");
            let result = use_case
                .execute_with_progress(input, progress.as_ref())
                .await?;

            let date = chrono::Local::now().date_naive();
            println!(
                "{}",
                ConsoleFormatter::format_sectioning(format, &config.sectioning.title, &result, date)
            );
            Ok(())
        }

        Command::Vote { text, ambiguity } => {
            let policy = ambiguity.unwrap_or(config.voting.ambiguity);
            let input = RunVotingInput::new(
                Subject::try_new(text)?,
                config.voting.voter_prompts()?,
                config.voting.label_set()?,
            )
            .with_policy(policy);

            if show_progress {
                print_banner("Voting", input.text.content(), &model, &ollama.base_url);
            }

            let use_case = RunVotingUseCase::new(RequestDispatcher::new(gateway, dispatch));
            let progress = progress_notifier(show_progress, "Voting");
            let result = use_case
                .execute_with_progress(input, progress.as_ref())
                .await?;

            println!("{}", ConsoleFormatter::format_voting(format, &result));
            Ok(())
        }
    }
}

/// Install the tracing subscriber, to stderr or to `log_file`
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();

            Ok(None)
        }
    }
}

/// An explicit `--config` must exist unless `--no-config` skips it
fn ensure_config_exists(cli: &Cli) -> Result<()> {
    if !cli.no_config
        && let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    // CLI flags override every file and environment source
    if let Some(url) = &cli.url {
        config.endpoint.url = url.clone();
    }
    if let Some(model) = &cli.model {
        config.endpoint.model = model.clone();
    }
    if cli.max_concurrency.is_some() {
        config.dispatch.max_concurrency = cli.max_concurrency;
    }

    Ok(config)
}

/// Bar on a terminal, plain lines otherwise
fn progress_notifier(enabled: bool, label: &str) -> Box<dyn ProgressNotifier> {
    if !enabled {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new(label))
    } else {
        Box::new(SimpleProgress)
    }
}

fn print_banner(pattern: &str, subject: &str, model: &Model, url: &str) {
    eprintln!();
    eprintln!("{} | model: {} | endpoint: {}", pattern, model, url);
    eprintln!("Input: {}", subject);
    eprintln!();
}

async fn run_check(gateway: &OllamaGateway, url: &str, model: &Model) -> Result<()> {
    use patterns_application::LlmGateway;

    match gateway.available_models().await {
        Ok(models) => {
            info!(count = models.len(), "Ollama reachable");
            print!("{}", ConsoleFormatter::format_check(url, model, &models));
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Connection check failed");
            if e.is_connection() {
                bail!("Cannot connect to Ollama at {}. Make sure it's running! ({})", url, e)
            }
            bail!("Ollama responded but with an error: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_an_error() {
        let cli =
            Cli::try_parse_from(["parallel-patterns", "--config", "/no/such/patterns.toml", "check"])
                .unwrap();
        let err = ensure_config_exists(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_no_config_ignores_missing_config() {
        let cli = Cli::try_parse_from([
            "parallel-patterns",
            "--config",
            "/no/such/patterns.toml",
            "--no-config",
            "check",
        ])
        .unwrap();
        assert!(ensure_config_exists(&cli).is_ok());

        let config = load_config(&cli).unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
