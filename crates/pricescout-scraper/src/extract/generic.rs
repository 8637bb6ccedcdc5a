//! Strategy 4: ranked CSS-class/attribute heuristics.
//!
//! Last resort for pages with neither structured data nor usable meta tags
//! nor site-specific rules. Works through priority-ordered selector lists
//! for "price-like" and "title-like" elements; the name filter rejects
//! short boilerplate strings.

use scraper::{ElementRef, Html, Selector};

use crate::price::scan_price;
use crate::types::ExtractedRecord;

/// Names this short are almost always nav headers or boilerplate.
const MIN_NAME_LEN: usize = 6;

const PRICE_SELECTORS: &[&str] = &[
    r#"[itemprop="price"]"#,
    "[data-price]",
    ".price",
    ".product-price",
    ".price-current",
    "[class*='price']",
];

const NAME_SELECTORS: &[&str] = &[
    r#"[itemprop="name"]"#,
    "h1",
    ".product-title",
    ".product-name",
    "[class*='product-title']",
    "[class*='product-name']",
    "title",
];

pub(super) fn extract_generic(html: &str, url: &str) -> Option<ExtractedRecord> {
    let document = Html::parse_document(html);

    let product_name = NAME_SELECTORS.iter().find_map(|s| {
        let selector = Selector::parse(s).expect("valid selector");
        document
            .select(&selector)
            .map(element_text)
            .find(|text| text.chars().count() >= MIN_NAME_LEN)
    })?;

    let (price, currency) = PRICE_SELECTORS.iter().find_map(|s| {
        let selector = Selector::parse(s).expect("valid selector");
        document.select(&selector).find_map(price_of)
    })?;

    Some(ExtractedRecord {
        link: url.to_string(),
        price,
        currency,
        product_name,
        availability: None,
    })
}

/// Price of one candidate element: machine-readable attributes win over
/// rendered text.
fn price_of(element: ElementRef<'_>) -> Option<(String, Option<String>)> {
    for attr in ["content", "data-price"] {
        if let Some(value) = element.value().attr(attr) {
            if let Some(priced) = scan_price(value) {
                return Some(priced);
            }
        }
    }
    scan_price(&element_text(element))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
