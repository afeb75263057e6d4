//! Data models for Alibaba search listings.

use crate::alibaba::countries::Country;
use serde::{Deserialize, Serialize};

/// One listing extracted from a search results page.
///
/// Only the title is mandatory; every other field is filled in when the
/// corresponding element exists in the listing markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Listing title text
    pub listing_title: String,
    /// Supplier display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    /// Supplier storefront URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    /// Supplier country or region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_location: Option<String>,
    /// Main listing image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Price text as shown on the page, unparsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Listing detail page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
}

impl ItemRecord {
    /// Creates a record with only a title.
    pub fn new(listing_title: impl Into<String>) -> Self {
        Self { listing_title: listing_title.into(), ..Default::default() }
    }
}

/// Inputs of a single search run.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text search query
    pub search_text: String,
    /// RapidAPI key for the rendering service
    pub api_key: String,
    /// Maximum number of result pages to attempt
    pub max_pages: u32,
    /// Proxy country for the renderer
    pub country: Country,
}
