//! CSS selectors for Alibaba search result markup.
//!
//! Alibaba serves more than one listing template (organic results and
//! sponsored/ad results use different class names). Each field is therefore
//! described by a [`SelectorChain`]: an ordered list of selectors tried in
//! priority order, primary layout first.
//!
//! **Update process**: when a new layout shows up, capture an HTML sample,
//! append its selector to the relevant chain and add a test fixture.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Ordered fallback list of selectors for a single field.
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Parses each pattern into a selector, keeping the given order.
    ///
    /// Patterns are compile-time constants, so a parse failure is a bug.
    pub fn parse(patterns: &[&str]) -> Self {
        let selectors = patterns.iter().map(|p| Selector::parse(p).unwrap()).collect();
        Self { selectors }
    }

    /// Returns the first descendant matched by the highest-priority selector
    /// that matches anything.
    pub fn first_match<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors.iter().find_map(|selector| element.select(selector).next())
    }

    /// Returns the trimmed text of the first match that has any, walking
    /// every selector in priority order.
    ///
    /// When elements match but all of them are blank the result is an empty
    /// string; `None` means nothing matched at all.
    pub fn first_text(&self, element: ElementRef) -> Option<String> {
        let mut matched = false;
        for found in self.selectors.iter().flat_map(move |selector| element.select(selector)) {
            matched = true;
            let text = element_text(found);
            if !text.is_empty() {
                return Some(text);
            }
        }
        matched.then(String::new)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.selectors.len()
    }
}

/// Collects the text of an element, trimmed.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Listing container, identified by its role marker rather than styling.
    pub static ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-role='item']").unwrap());

    /// Listing title text.
    pub static TITLE: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::parse(&[".organic-gallery-title__content", ".elements-title-normal__content"])
    });

    /// Supplier name link (text is the name, href the storefront).
    pub static SELLER: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::parse(&["[flasher-type='supplierName']"]));

    /// Supplier country tag; the country lives in the `title` attribute.
    pub static SELLER_COUNTRY: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::parse(&[".seller-tag__country"]));

    pub static SELLER_COUNTRY_ATTRS: &[&str] = &["title"];

    /// Listing image.
    pub static IMAGE: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::parse(&[".J-img-switcher-item"]));

    /// `src` is a placeholder until lazy loading runs, so `data-src` wins.
    pub static IMAGE_ATTRS: &[&str] = &["data-src", "src"];

    /// Price text.
    pub static PRICE: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::parse(&[".gallery-offer-price", ".elements-offer-price-normal__price"])
    });

    /// Link wrapping the title, pointing at the listing detail page.
    pub static ITEM_LINK: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::parse(&[".organic-gallery-title", ".elements-title-normal"])
    });

    pub static LINK_ATTRS: &[&str] = &["href"];
}
