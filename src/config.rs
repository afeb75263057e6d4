//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::alibaba::countries::Country;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default rendering API base URL.
pub const DEFAULT_API_URL: &str = "https://scrapingant.p.rapidapi.com";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy country requested from the renderer
    #[serde(default)]
    pub country: Country,

    /// Maximum number of result pages to fetch
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Directory that receives the output files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Rendering API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Local proxy for reaching the rendering API (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// How long the renderer waits after scrolling to the bottom
    #[serde(default = "default_scroll_wait_ms")]
    pub scroll_wait_ms: u64,
}

fn default_pages() -> u32 {
    2
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_scroll_wait_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country: Country::Us,
            pages: default_pages(),
            output_dir: default_output_dir(),
            api_url: default_api_url(),
            proxy: None,
            timeout_secs: None,
            scroll_wait_ms: default_scroll_wait_ms(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ali-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(country) = std::env::var("ALI_COUNTRY") {
            if let Ok(c) = country.parse() {
                self.country = c;
            }
        }

        if let Ok(pages) = std::env::var("ALI_PAGES") {
            if let Ok(p) = pages.parse::<u32>() {
                if p > 0 {
                    self.pages = p;
                }
            }
        }

        if let Ok(dir) = std::env::var("ALI_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("ALI_API_URL") {
            self.api_url = url;
        }

        self
    }
}
