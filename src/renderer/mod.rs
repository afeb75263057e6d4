//! Client for the external headless-browser rendering service.

pub mod client;
pub mod error;

pub use client::{scroll_to_bottom_snippet, Renderer, ScrapingAntClient};
pub use error::RenderError;
