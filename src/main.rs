//! ali-crawler - Alibaba search-result scraper CLI
//!
//! Renders search pages through ScrapingAnt and saves the listings as a
//! tab-delimited file.

use ali_crawler::alibaba::{Country, SearchRequest};
use ali_crawler::commands::SearchCommand;
use ali_crawler::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ali-crawler",
    version,
    about = "Scrape Alibaba search results into a tab-delimited file",
    long_about = "Renders Alibaba search pages through the ScrapingAnt API (RapidAPI) and \
                  saves the extracted listings to <output-dir>/<search text>_<timestamp>.csv."
)]
struct Cli {
    /// Text to search for
    #[arg(required_unless_present = "list_countries")]
    search_string: Option<String>,

    /// API key from https://rapidapi.com/okami4kak/api/scrapingant
    #[arg(long = "rapidapi_key", env = "RAPIDAPI_KEY", hide_env_values = true,
          required_unless_present = "list_countries")]
    rapidapi_key: Option<String>,

    /// Maximum number of result pages to fetch [default: 2]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// Proxy country code for the renderer [default: us]
    #[arg(long)]
    country: Option<Country>,

    /// Directory for output files [default: data]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List supported proxy countries and exit
    #[arg(long)]
    list_countries: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter: DEBUG everywhere with `-v`, otherwise per-page progress from
/// this crate and warnings from dependencies.
fn log_filter(verbose: bool) -> Result<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::new(Level::DEBUG.to_string()));
    }
    Ok(EnvFilter::from_default_env()
        .add_directive(Level::WARN.into())
        .add_directive("ali_crawler=info".parse()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)?).with_target(false).init();

    if cli.list_countries {
        println!("Supported proxy countries:\n");
        println!("{:<6} {:<24}", "Code", "Country");
        println!("{:-<6} {:-<24}", "", "");

        for country in Country::all() {
            println!("{:<6} {:<24}", country.code(), country.name());
        }
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(pages) = cli.pages {
        config.pages = pages;
    }
    if let Some(country) = cli.country {
        config.country = country;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let request = SearchRequest {
        search_text: cli.search_string.context("Missing search text")?,
        api_key: cli.rapidapi_key.context("Missing --rapidapi_key")?,
        max_pages: config.pages,
        country: config.country,
    };

    let cmd = SearchCommand::new(config);
    let outcome = cmd.execute(&request).await?;
    println!("{}", outcome);

    Ok(())
}
