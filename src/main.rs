use anyhow::{Context, Result};
use clap::Parser;
use pharma_papers::classify::Classifier;
use pharma_papers::config::{find_config_file, load_config, Config};
use pharma_papers::models::SearchQuery;
use pharma_papers::output;
use pharma_papers::pubmed::PubMedClient;
use pharma_papers::utils::HttpClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Find PubMed papers with pharmaceutical or biotech affiliated authors
#[derive(Parser, Debug)]
#[command(name = "pharma-papers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query PubMed and keep papers with industry-affiliated authors", long_about = None)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Maximum number of papers to fetch
    #[arg(long, short = 'm', default_value = "10", value_parser = clap::value_parser!(u64).range(1..=10_000))]
    max_results: u64,

    /// Write results to this CSV file instead of standard output
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Enable verbose diagnostic logging on standard error
    #[arg(long, short = 'd')]
    debug: bool,

    /// Request timeout in seconds (overrides the config file; default 30)
    #[arg(long)]
    timeout: Option<u64>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr only, so CSV on stdout stays clean
    let log_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pharma_papers={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::debug!(path = %config_path.display(), "Using config file");
        load_config(&config_path)?
    } else {
        Config::default()
    };

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.http.timeout_secs));
    let client = PubMedClient::new(HttpClient::with_timeout(timeout));
    let classifier = Classifier::new(&config.classifier);

    let query = SearchQuery::new(&cli.query).max_results(cli.max_results as usize);
    let ids = client.search(&query).await?;
    if ids.is_empty() {
        tracing::warn!("No articles found for the given query");
    }

    let papers = client.fetch(&ids).await?;
    tracing::info!(fetched = papers.len(), "Fetched article details");

    let records: Vec<_> = papers
        .iter()
        .filter_map(|paper| classifier.classify(paper))
        .collect();
    tracing::info!(matched = records.len(), "Papers with industry-affiliated authors");

    match &cli.file {
        Some(path) => output::write_csv_file(&records, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => output::write_stdout(&records)?,
    }

    Ok(())
}
