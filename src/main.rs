//! Event Ideator CLI
//!
//! Turns an event description into branded event concepts via an LLM.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use event_ideator::{
    config::Config,
    llm::LlmClient,
    report::save_report,
    search::WebSearcher,
    workflow::{EMPTY_DESCRIPTION_MESSAGE, Workflow},
};
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

/// Event Ideator - LLM-powered event concept generator
#[derive(Parser)]
#[command(name = "event-ideator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate event concepts for a description
    Generate {
        /// Event description (read from stdin when omitted)
        description: Option<String>,

        /// Print the report as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Also save the report (.json for JSON, anything else for markdown)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum in-flight calls during fan-out stages
        #[arg(short, long)]
        concurrency: Option<usize>,
    },

    /// Run only the web search step for some keywords
    Search {
        /// Keywords to search for
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Show the resolved configuration
    Config,

    /// Test LLM connection
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Generate {
            description,
            json,
            output,
            concurrency,
        } => cmd_generate(description, json, output, concurrency).await,
        Commands::Search { keywords } => cmd_search(keywords).await,
        Commands::Config => cmd_config(),
        Commands::Test => cmd_test().await,
    }
}

/// Initialize tracing based on CLI flags. Logs go to stderr.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "event_ideator=warn",
        1 => "event_ideator=info",
        2 => "event_ideator=debug",
        _ => "event_ideator=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn load_config() -> Result<Config> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn cmd_generate(
    description: Option<String>,
    json: bool,
    output: Option<PathBuf>,
    concurrency: Option<usize>,
) -> Result<()> {
    let description = match description {
        Some(d) => d,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read description from stdin")?;
            buf
        }
    };

    // Blank input never needs credentials.
    if description.trim().is_empty() {
        println!("{}", EMPTY_DESCRIPTION_MESSAGE);
        return Ok(());
    }

    let mut config = load_config()?;
    if let Some(n) = concurrency {
        anyhow::ensure!(n > 0, "--concurrency must be at least 1");
        config.workflow.concurrency = n;
    }

    let client = LlmClient::new(config.llm.clone());
    let workflow = Workflow::new(client, config.workflow);

    let start = Instant::now();
    let report = workflow
        .ideate(&description)
        .await
        .context("Workflow failed")?;
    let duration = start.elapsed();

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("{}", report);
    }

    if let Some(path) = output {
        save_report(&report, &path).context("Failed to save report")?;
        eprintln!("Report saved to: {}", path.display());
    }

    eprintln!(
        "Generated {} keyword summaries from {} search results in {:.2?}",
        report.summaries.len(),
        report.search_results.len(),
        duration
    );

    Ok(())
}

async fn cmd_search(keywords: Vec<String>) -> Result<()> {
    let config = load_config()?;
    let client = LlmClient::new(config.llm);
    let searcher = WebSearcher::new(&client, config.workflow.brand)
        .with_max_results(config.workflow.max_search_results);

    println!("Searching for: {}", keywords.join(", "));
    println!();

    let results = searcher.search(&keywords).await.context("Search failed")?;

    if results.is_empty() {
        println!("No results parsed from search output.");
        return Ok(());
    }

    println!("Results:");
    println!("{}", "─".repeat(60));
    for (i, result) in results.iter().enumerate() {
        println!("{:>2}. {}", i + 1, result.title);
        if result.url != result.title {
            println!("    {}", result.url);
        }
    }
    println!("{}", "─".repeat(60));

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration");
    println!("{}", "─".repeat(40));
    match Config::config_file_path() {
        Some(path) => println!("  Config file:   {}", path.display()),
        None => println!("  Config file:   (no config directory)"),
    }
    println!("  API Base:      {}", config.llm.api_base);
    println!("  Model:         {}", config.llm.model);
    println!("  Search model:  {}", config.llm.search_model);
    println!("  API Key:       {}", config.masked_api_key());
    match config.llm.timeout_secs {
        Some(secs) => println!("  Timeout:       {}s", secs),
        None => println!("  Timeout:       none"),
    }
    println!("  Brand:         {}", config.workflow.brand);
    println!("  Concurrency:   {}", config.workflow.concurrency);
    println!("  Summaries:     {}", config.workflow.max_summaries);
    println!("  Max results:   {}", config.workflow.max_search_results);

    if let Err(e) = config.validate() {
        println!();
        println!("Configuration error: {}", e);
    }

    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("Testing LLM connection...\n");

    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!("  API Key:   {}", config.masked_api_key());
    println!();

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = LlmClient::new(config.llm);

    println!("Sending test request to {}...", client.model());
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful!");
        }
        Err(e) => {
            println!("Connection failed: {}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_blank_description_skips_configuration() {
        // A zero concurrency is rejected only after the config loads.
        for input in ["", "   ", "\n\t"] {
            let result = cmd_generate(Some(input.to_string()), false, None, Some(0)).await;
            assert!(result.is_ok(), "blank input {input:?} failed: {result:?}");
        }
    }

    #[test]
    fn test_cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "event-ideator",
            "-v",
            "generate",
            "Product launch",
            "--json",
            "--concurrency",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Generate {
                description,
                json,
                concurrency,
                output,
            } => {
                assert_eq!(description.as_deref(), Some("Product launch"));
                assert!(json);
                assert_eq!(concurrency, Some(2));
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }
}
