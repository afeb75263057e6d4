//! Fetch-and-extract for a single search page, with bounded retries.

use crate::alibaba::countries::Country;
use crate::alibaba::models::ItemRecord;
use crate::alibaba::parser::Parser;
use crate::renderer::{RenderError, Renderer};
use thiserror::Error;
use tracing::{debug, warn};

/// Total attempts per page, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Why one fetch attempt produced nothing.
#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("no items extracted")]
    EmptyPage,
}

/// Renders a page and extracts its listings, retrying on failure.
pub struct PageFetcher<'a, R: Renderer + ?Sized> {
    renderer: &'a R,
    parser: Parser,
    script: Option<String>,
    country: Option<Country>,
}

impl<'a, R: Renderer + ?Sized> PageFetcher<'a, R> {
    /// Creates a fetcher that renders through `renderer`.
    pub fn new(renderer: &'a R) -> Self {
        Self { renderer, parser: Parser::new(), script: None, country: None }
    }

    /// Sets the post-load script sent with every render call.
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Sets the proxy country sent with every render call.
    pub fn country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    /// Returns the listings on `url`.
    ///
    /// Render failures and empty pages are retried up to [`MAX_ATTEMPTS`]
    /// times in total. When every attempt fails the result is empty; errors
    /// never escape this method.
    pub async fn fetch_page(&self, url: &str) -> Vec<ItemRecord> {
        let mut attempt = 0;
        while attempt < MAX_ATTEMPTS {
            attempt += 1;
            debug!("Fetching {} (attempt {}/{})", url, attempt, MAX_ATTEMPTS);

            match self.attempt(url).await {
                Ok(items) => return items,
                Err(e) => warn!("Attempt {}/{} for {} failed: {}", attempt, MAX_ATTEMPTS, url, e),
            }
        }

        debug!("Giving up on {} after {} attempts", url, MAX_ATTEMPTS);
        Vec::new()
    }

    async fn attempt(&self, url: &str) -> Result<Vec<ItemRecord>, AttemptError> {
        let html = self.renderer.render(url, self.script.as_deref(), self.country).await?;

        let items = self.parser.extract(&html);
        if items.is_empty() {
            return Err(AttemptError::EmptyPage);
        }
        Ok(items)
    }
}
