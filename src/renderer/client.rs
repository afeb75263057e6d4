//! HTTP client for the ScrapingAnt rendering API (via RapidAPI).

use crate::alibaba::countries::Country;
use crate::config::Config;
use crate::renderer::error::RenderError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// RapidAPI host header value for ScrapingAnt.
pub const RAPIDAPI_HOST: &str = "scrapingant.p.rapidapi.com";

/// Trait for page rendering - enables mocking for tests.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders `url` in a headless browser and returns the final HTML.
    ///
    /// `script` runs after page load; `proxy_country` selects the egress
    /// location of the renderer's proxy.
    async fn render(
        &self,
        url: &str,
        script: Option<&str>,
        proxy_country: Option<Country>,
    ) -> Result<String, RenderError>;
}

/// Builds the post-load snippet that scrolls to the end of the page and
/// waits `wait_ms` so lazy-loaded listings get rendered.
pub fn scroll_to_bottom_snippet(wait_ms: u64) -> String {
    format!(
        "window.scrollTo(0,document.body.scrollHeight);\n\
         await new Promise(r => setTimeout(r, {}));",
        wait_ms
    )
}

/// JSON payload accepted by the `/post` endpoint.
#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    js_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy_country: Option<&'static str>,
}

impl<'a> RenderRequest<'a> {
    fn new(url: &'a str, script: Option<&str>, proxy_country: Option<Country>) -> Self {
        Self {
            url,
            js_snippet: script.map(|s| STANDARD.encode(s.as_bytes())),
            proxy_country: proxy_country.map(|c| c.code()),
        }
    }
}

/// ScrapingAnt client authenticated with a RapidAPI key.
pub struct ScrapingAntClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ScrapingAntClient {
    /// Creates a new client from the configuration and API key.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder().gzip(true).brotli(true);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/post", self.base_url)
    }
}

#[async_trait]
impl Renderer for ScrapingAntClient {
    async fn render(
        &self,
        url: &str,
        script: Option<&str>,
        proxy_country: Option<Country>,
    ) -> Result<String, RenderError> {
        info!("getting page {}", url);

        let body = serde_json::to_string(&RenderRequest::new(url, script, proxy_country))?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .header("x-rapidapi-key", self.api_key.as_str())
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(RenderError::Request)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(RenderError::Status(status.as_u16()));
        }

        response.text().await.map_err(RenderError::Body)
    }
}
