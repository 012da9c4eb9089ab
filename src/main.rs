//! Paper-Lantern main entry point
//!
//! This is the command-line interface for the Paper-Lantern academic
//! paper crawler.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use paper_lantern::config::{load_config_with_hash, validate, Config};
use paper_lantern::crawler::{crawl_field, crawl_paper};
use paper_lantern::store::{open_store, Store};
use paper_lantern::summarizer::LlmClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Paper-Lantern: an academic paper crawler
///
/// Paper-Lantern crawls paper listings and detail pages from an
/// arXiv-style archive and stores structured records locally. Crawled
/// papers can optionally be summarized through a chat-completion API.
#[derive(Parser, Debug)]
#[command(name = "paper-lantern")]
#[command(version = "0.1.0")]
#[command(about = "An academic paper crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Crawl the recent submissions of one field (e.g. "cs.AI")
    #[arg(long, conflicts_with = "url")]
    field: Option<String>,

    /// Crawl a single paper by its detail page URL
    #[arg(long, conflicts_with = "field")]
    url: Option<String>,

    /// Upper bound on papers to crawl in field mode
    #[arg(long, value_name = "N")]
    max_papers: Option<usize>,

    /// Directory for stored records (overrides the config file)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Summarize the crawled paper (URL mode only)
    #[arg(long, requires = "url")]
    summarize: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if let Some(url) = &cli.url {
        handle_url(&config, url, cli.summarize).await?;
    } else if let Some(field) = &cli.field {
        handle_field(&config, field).await?;
    } else {
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("paper_lantern=info,warn"),
            1 => EnvFilter::new("paper_lantern=debug,info"),
            2 => EnvFilter::new("paper_lantern=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration and applies command-line overrides
///
/// Without `--config` the built-in defaults are used. Overridden values
/// are re-validated so a bad flag fails as loudly as a bad file.
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_papers) = cli.max_papers {
        config.crawl.max_papers = max_papers;
    }

    if let Some(data_dir) = &cli.data_dir {
        config.output.data_dir = data_dir.clone();
    }

    if cli.max_papers.is_some() || cli.data_dir.is_some() {
        validate(&config).context("Invalid command-line override")?;
    }

    Ok(config)
}

/// Handles URL mode: crawl one paper, store it, optionally summarize it
async fn handle_url(config: &Config, url: &str, summarize: bool) -> anyhow::Result<()> {
    let record = crawl_paper(config, url)
        .await
        .with_context(|| format!("Failed to crawl {}", url))?;

    println!("Crawled paper: {}", record.title);
    if let Some(abstract_text) = &record.abstract_text {
        println!("Abstract: {}...", truncate(abstract_text, 200));
    }

    let mut store = open_store(&config.output)?;
    store.upsert_paper(&record)?;
    tracing::info!("Stored record for {}", record.url);

    if summarize {
        let client = LlmClient::from_config(&config.llm)?;
        let summary = client
            .summarize_paper(&record)
            .await
            .context("Summarization failed")?;
        println!("\n{}", summary);
    }

    Ok(())
}

/// Handles field mode: crawl the listing and store every record
async fn handle_field(config: &Config, field: &str) -> anyhow::Result<()> {
    let records = crawl_field(config, field)
        .await
        .with_context(|| format!("Failed to crawl {} listing", field))?;

    println!("Crawled {} papers from {}", records.len(), field);
    for record in records.iter().take(5) {
        println!("- {}", record.title);
    }

    let mut store = open_store(&config.output)?;
    let written = store.upsert_papers(&records)?;
    tracing::info!("Stored {} records", written);

    Ok(())
}

/// Truncates to at most `max_chars` characters, on a char boundary
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
