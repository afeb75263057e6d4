//! Alibaba-specific modules for search parsing, fetching and data models.

pub mod countries;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod selectors;

pub use countries::Country;
pub use fetcher::PageFetcher;
pub use models::{ItemRecord, SearchRequest};
pub use parser::Parser;
