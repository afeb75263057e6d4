//! Search command implementation.

use crate::alibaba::{Country, ItemRecord, PageFetcher, SearchRequest};
use crate::config::Config;
use crate::output::OutputWriter;
use crate::renderer::{scroll_to_bottom_snippet, Renderer, ScrapingAntClient};
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Alibaba search endpoint.
pub const SEARCH_BASE_URL: &str = "https://www.alibaba.com/trade/search";

/// Builds the first-page search URL for `search_text`.
pub fn search_url(search_text: &str) -> String {
    format!("{}?SearchText={}", SEARCH_BASE_URL, urlencoding::encode(search_text))
}

/// Builds the URL of result page `page` (2 and above) from the base URL.
pub fn page_url(base_url: &str, page: u32) -> String {
    format!("{}&page={}", base_url, page)
}

/// What a finished search run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Items were found and written to `path`.
    Saved { count: usize, path: PathBuf },
    /// No page yielded any items; nothing was written.
    NoItems,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Saved { count, path } => {
                write!(f, "Got {} items. Data saved to {}", count, path.display())
            }
            SearchOutcome::NoItems => write!(f, "no items found"),
        }
    }
}

/// Executes a paginated search and writes the results.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search against the rendering API.
    pub async fn execute(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let client = ScrapingAntClient::new(&self.config, request.api_key.as_str())
            .context("Failed to create rendering API client")?;

        self.execute_with_renderer(&client, request).await
    }

    /// Executes the search with a provided renderer (for testing).
    pub async fn execute_with_renderer(
        &self,
        renderer: &impl Renderer,
        request: &SearchRequest,
    ) -> Result<SearchOutcome> {
        let items =
            self.search(renderer, &request.search_text, request.max_pages, request.country).await;

        let writer = OutputWriter::new(&self.config.output_dir);
        match writer.save(&request.search_text, &items)? {
            Some(path) => Ok(SearchOutcome::Saved { count: items.len(), path }),
            None => Ok(SearchOutcome::NoItems),
        }
    }

    /// Collects listings from up to `max_pages` result pages.
    ///
    /// Page 1 uses the bare search URL. Fetching stops at the first page
    /// that yields nothing; later pages are never requested.
    pub async fn search(
        &self,
        renderer: &impl Renderer,
        search_text: &str,
        max_pages: u32,
        country: Country,
    ) -> Vec<ItemRecord> {
        info!("Searching for: {}", search_text);

        let fetcher = PageFetcher::new(renderer)
            .script(scroll_to_bottom_snippet(self.config.scroll_wait_ms))
            .country(country);

        let base_url = search_url(search_text);
        let mut all_items = fetcher.fetch_page(&base_url).await;
        if all_items.is_empty() {
            debug!("No results on page 1");
            return all_items;
        }

        for page in 2..=max_pages {
            let items = fetcher.fetch_page(&page_url(&base_url, page)).await;
            if items.is_empty() {
                debug!("No results on page {}, stopping", page);
                break;
            }

            debug!("Page {} returned {} items", page, items.len());
            all_items.extend(items);
        }

        info!("Found {} items", all_items.len());
        all_items
    }
}
