//! ali-crawler - Alibaba search-result scraper CLI
//!
//! Renders search pages through the ScrapingAnt headless-browser API,
//! extracts listing records and writes them to a tab-delimited file.

pub mod alibaba;
pub mod commands;
pub mod config;
pub mod output;
pub mod renderer;

pub use alibaba::countries::Country;
pub use alibaba::models::{ItemRecord, SearchRequest};
pub use config::Config;
pub use renderer::RenderError;
