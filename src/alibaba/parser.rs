//! HTML parser for Alibaba search results.

use crate::alibaba::models::ItemRecord;
use crate::alibaba::selectors::{element_text, search, SelectorChain};
use scraper::{ElementRef, Html};
use tracing::{info, trace};

/// Protocol-relative marker Alibaba puts in front of its links and images.
const PROTOCOL_RELATIVE_PREFIX: &str = "//";

/// Parser for Alibaba search result pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Extracts one record per listing, in document order.
    ///
    /// Listings without a title element are skipped; every other field is
    /// optional and left as `None` when its element or attribute is missing.
    pub fn extract(&self, html: &str) -> Vec<ItemRecord> {
        let document = Html::parse_document(html);

        let mut items = Vec::new();
        for element in document.select(&search::ITEM) {
            match self.parse_item(element) {
                Some(item) => {
                    trace!("Parsed item: {}", item.listing_title);
                    items.push(item);
                }
                None => trace!("Skipping listing without title"),
            }
        }

        info!("Got {} items", items.len());
        items
    }

    /// Parses a single listing container.
    fn parse_item(&self, element: ElementRef) -> Option<ItemRecord> {
        let listing_title = search::TITLE.first_text(element)?;

        let seller = search::SELLER.first_match(element);
        let seller_name = seller.map(element_text);
        let store_url = seller.and_then(|e| link_attr(e, search::LINK_ATTRS));

        let seller_location = search::SELLER_COUNTRY
            .first_match(element)
            .and_then(|e| attr(e, search::SELLER_COUNTRY_ATTRS))
            .map(String::from);

        let image_url = field_link(element, &search::IMAGE, search::IMAGE_ATTRS);

        let price = search::PRICE.first_text(element);

        let item_url = field_link(element, &search::ITEM_LINK, search::LINK_ATTRS);

        Some(ItemRecord {
            listing_title,
            seller_name,
            store_url,
            seller_location,
            image_url,
            price,
            item_url,
        })
    }
}

/// Returns the first attribute present among `names`, trimmed.
///
/// A present but empty attribute yields `Some("")`.
fn attr<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| element.value().attr(name)).map(str::trim)
}

fn link_attr(element: ElementRef, names: &[&str]) -> Option<String> {
    attr(element, names).map(strip_protocol_relative)
}

fn field_link(element: ElementRef, chain: &SelectorChain, names: &[&str]) -> Option<String> {
    chain.first_match(element).and_then(|e| link_attr(e, names))
}

/// Drops the leading `//` of a protocol-relative URL.
///
/// Absolute URLs are returned unchanged.
pub fn strip_protocol_relative(url: &str) -> String {
    url.strip_prefix(PROTOCOL_RELATIVE_PREFIX).unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ITEM: &str = r#"
        <html><body>
            <div class="organic-list">
                <div class="list-no-v2-outter" data-role="item">
                    <a class="organic-gallery-title" href="//www.alibaba.com/product-detail/widget_1.html">
                        <h2 class="organic-gallery-title__content">Steel Widget 10mm</h2>
                    </a>
                    <img class="J-img-switcher-item" src="//s.alicdn.com/placeholder.png"
                         data-src="//s.alicdn.com/widget.jpg">
                    <div class="gallery-offer-price">US$1.20-2.50</div>
                    <a flasher-type="supplierName" href="//acme.en.alibaba.com">Acme Manufacturing Co.</a>
                    <span class="seller-tag__country" title="CN">CN</span>
                </div>
            </div>
        </body></html>
    "#;

    fn item_html(body: &str) -> String {
        format!(r#"<html><body><div data-role="item">{}</div></body></html>"#, body)
    }

    #[test]
    fn test_extract_full_item() {
        let items = Parser::new().extract(FULL_ITEM);
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.listing_title, "Steel Widget 10mm");
        assert_eq!(item.seller_name.as_deref(), Some("Acme Manufacturing Co."));
        assert_eq!(item.store_url.as_deref(), Some("acme.en.alibaba.com"));
        assert_eq!(item.seller_location.as_deref(), Some("CN"));
        assert_eq!(item.image_url.as_deref(), Some("s.alicdn.com/widget.jpg"));
        assert_eq!(item.price.as_deref(), Some("US$1.20-2.50"));
        assert_eq!(item.item_url.as_deref(), Some("www.alibaba.com/product-detail/widget_1.html"));
    }

    #[test]
    fn test_extract_no_item_markers() {
        let html = r#"
            <html><body>
                <div class="organic-gallery-title__content">Not inside an item</div>
            </body></html>
        "#;
        assert!(Parser::new().extract(html).is_empty());
        assert!(Parser::new().extract("").is_empty());
    }

    #[test]
    fn test_extract_skips_item_without_title() {
        let html = r#"
            <html><body>
                <div data-role="item">
                    <h2 class="organic-gallery-title__content">First</h2>
                    <div class="gallery-offer-price">US$1.00</div>
                </div>
                <div data-role="item">
                    <div class="gallery-offer-price">US$9.99</div>
                    <a flasher-type="supplierName" href="//orphan.en.alibaba.com">Orphan</a>
                </div>
                <div data-role="item">
                    <h2 class="elements-title-normal__content">Third</h2>
                    <div class="elements-offer-price-normal__price">US$3.00</div>
                </div>
            </body></html>
        "#;

        let items = Parser::new().extract(html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].listing_title, "First");
        assert_eq!(items[0].price.as_deref(), Some("US$1.00"));
        assert_eq!(items[1].listing_title, "Third");
        assert_eq!(items[1].price.as_deref(), Some("US$3.00"));
        assert!(items.iter().all(|i| i.seller_name.is_none()));
    }

    #[test]
    fn test_extract_blank_title_is_kept() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content">   </h2>
               <div class="gallery-offer-price">US$2.00</div>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].listing_title, "");
        assert_eq!(items[0].price.as_deref(), Some("US$2.00"));
    }

    #[test]
    fn test_blank_primary_title_uses_alternate_layout() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content"> </h2>
               <p class="elements-title-normal__content">Real Title</p>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].listing_title, "Real Title");
    }

    #[test]
    fn test_blank_primary_price_uses_alternate_layout() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content">Widget</h2>
               <div class="gallery-offer-price"></div>
               <span class="elements-offer-price-normal__price">US$4.10</span>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items[0].price.as_deref(), Some("US$4.10"));
    }

    #[test]
    fn test_empty_attributes_are_kept_empty() {
        let html = item_html(
            r#"<a class="organic-gallery-title" href="">
                   <h2 class="organic-gallery-title__content">Widget</h2>
               </a>
               <a flasher-type="supplierName" href="">Acme</a>
               <span class="seller-tag__country" title=""></span>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items[0].item_url.as_deref(), Some(""));
        assert_eq!(items[0].store_url.as_deref(), Some(""));
        assert_eq!(items[0].seller_location.as_deref(), Some(""));
    }

    #[test]
    fn test_extract_sponsored_layout() {
        let html = item_html(
            r#"<a class="elements-title-normal" href="//www.alibaba.com/product-detail/ad_9.html">
                   <p class="elements-title-normal__content">Sponsored Widget</p>
               </a>
               <span class="elements-offer-price-normal__price">US$4.10</span>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].listing_title, "Sponsored Widget");
        assert_eq!(items[0].price.as_deref(), Some("US$4.10"));
        assert_eq!(items[0].item_url.as_deref(), Some("www.alibaba.com/product-detail/ad_9.html"));
    }

    #[test]
    fn test_extract_title_only() {
        let html = item_html(r#"<h2 class="organic-gallery-title__content">Bare</h2>"#);

        let items = Parser::new().extract(&html);
        assert_eq!(items, vec![ItemRecord::new("Bare")]);
    }

    #[test]
    fn test_seller_without_href() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content">Widget</h2>
               <span flasher-type="supplierName">No Link Ltd.</span>"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items[0].seller_name.as_deref(), Some("No Link Ltd."));
        assert!(items[0].store_url.is_none());
    }

    #[test]
    fn test_country_tag_without_title_attribute() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content">Widget</h2>
               <span class="seller-tag__country">CN</span>"#,
        );

        let items = Parser::new().extract(&html);
        // Text content is not a substitute for the tooltip
        assert!(items[0].seller_location.is_none());
    }

    #[test]
    fn test_image_falls_back_to_src() {
        let html = item_html(
            r#"<h2 class="organic-gallery-title__content">Widget</h2>
               <img class="J-img-switcher-item" src="//s.alicdn.com/eager.jpg">"#,
        );

        let items = Parser::new().extract(&html);
        assert_eq!(items[0].image_url.as_deref(), Some("s.alicdn.com/eager.jpg"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let parser = Parser::new();
        let first = parser.extract(FULL_ITEM);
        let second = parser.extract(FULL_ITEM);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_strip_protocol_relative() {
        assert_eq!(strip_protocol_relative("//s.alicdn.com/a.jpg"), "s.alicdn.com/a.jpg");
        assert_eq!(strip_protocol_relative("https://s.alicdn.com/a.jpg"), "https://s.alicdn.com/a.jpg");
        assert_eq!(strip_protocol_relative("/relative"), "/relative");
        assert_eq!(strip_protocol_relative(""), "");
    }
}
