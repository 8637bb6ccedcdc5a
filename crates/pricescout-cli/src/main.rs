use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricescout_core::AppConfig;
use pricescout_discovery::DiscoveryClient;
use pricescout_scraper::AggregateOptions;

/// Longest product name printed before ellipsis truncation kicks in.
const MAX_NAME_WIDTH: usize = 60;

#[derive(Debug, Parser)]
#[command(name = "pricescout")]
#[command(about = "Product price discovery across online shops")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search shops for a product and print listings, cheapest first.
    Search {
        /// Product to search for.
        query: String,
        /// Two-letter country code for the market to search.
        #[arg(long, default_value = "US")]
        country: String,
        /// Print at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pricescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            country,
            limit,
        } => run_search(&config, &query, &country, limit).await,
    }
}

async fn run_search(
    config: &AppConfig,
    query: &str,
    country: &str,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let country = country.trim().to_uppercase();

    let discovery = DiscoveryClient::new(&config.serpapi_api_key, config.discovery_timeout_secs)?;
    let candidates = discovery.search_candidates(query, &country).await?;
    if candidates.is_empty() {
        println!("no candidate shops found for \"{query}\"");
        return Ok(());
    }
    tracing::info!(candidates = candidates.len(), "discovered candidate shops");

    let options = AggregateOptions {
        timeout_secs: config.scraper_request_timeout_secs,
        similarity_threshold: config.similarity_threshold,
        max_concurrent: config.scraper_max_concurrent_fetches,
    };
    let mut results = pricescout_scraper::aggregate(query, &country, candidates, &options).await?;
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    if results.is_empty() {
        println!("no listings matched \"{query}\"");
        return Ok(());
    }

    let name_width = results
        .iter()
        .map(|r| r.product_name.chars().count().min(MAX_NAME_WIDTH))
        .max()
        .unwrap_or(0);
    let source_width = results
        .iter()
        .map(|r| r.source.chars().count())
        .max()
        .unwrap_or(0);

    for result in &results {
        println!(
            "{:>3} {:>12}  {:<name_width$}  {:<source_width$}  {}",
            result.currency,
            result.price,
            ellipsize(&result.product_name, MAX_NAME_WIDTH),
            result.source,
            result.link,
        );
    }
    Ok(())
}

/// Char-aware truncation so multibyte names never split mid-character.
fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
