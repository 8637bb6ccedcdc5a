//! Strategy 2: OpenGraph / product meta-tag extraction.
//!
//! Reads social-preview meta tags for title and price, including the
//! Twitter labeled-pair scheme where `twitter:label<N>` declares that the
//! adjacent `twitter:data<N>` tag carries a price. Succeeds only when both
//! a name and a price are found.

use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::price::scan_price;
use crate::types::ExtractedRecord;

const NAME_KEYS: [&str; 3] = ["og:title", "twitter:title", "title"];
const AMOUNT_KEYS: [&str; 3] = [
    "product:price:amount",
    "og:price:amount",
    "og:product:price:amount",
];
const CURRENCY_KEYS: [&str; 3] = [
    "product:price:currency",
    "og:price:currency",
    "og:product:price:currency",
];
const AVAILABILITY_KEYS: [&str; 2] = ["og:availability", "product:availability"];

pub(super) fn extract_meta(html: &str, url: &str) -> Option<ExtractedRecord> {
    let tags = collect_meta_tags(html);

    let product_name = NAME_KEYS
        .iter()
        .find_map(|k| tags.get(*k))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    // Direct amount tags first, the labeled-pair scheme as a fallback.
    let priced = AMOUNT_KEYS
        .iter()
        .find_map(|k| tags.get(*k).and_then(|raw| scan_price(raw)))
        .or_else(|| labeled_pair_price(&tags));
    let (price, lexed_currency) = priced?;

    let currency = CURRENCY_KEYS
        .iter()
        .find_map(|k| tags.get(*k))
        .filter(|s| !s.is_empty())
        .cloned()
        .or(lexed_currency);

    let availability = AVAILABILITY_KEYS.iter().find_map(|k| tags.get(*k)).cloned();

    Some(ExtractedRecord {
        link: url.to_string(),
        price,
        currency,
        product_name,
        availability,
    })
}

/// Lowercased `property`/`name` attribute → `content`, first occurrence wins.
fn collect_meta_tags(html: &str) -> HashMap<String, String> {
    let document = Html::parse_document(html);
    let meta = Selector::parse("meta").expect("valid selector");

    let mut tags = HashMap::new();
    for element in document.select(&meta) {
        let key = element
            .value()
            .attr("property")
            .or_else(|| element.value().attr("name"));
        let (Some(key), Some(content)) = (key, element.value().attr("content")) else {
            continue;
        };
        tags.entry(key.to_lowercase())
            .or_insert_with(|| content.to_string());
    }
    tags
}

/// Twitter card labeled pairs: a `twitter:label<N>` tag whose content reads
/// like a price label promotes `twitter:data<N>` to price text.
fn labeled_pair_price(tags: &HashMap<String, String>) -> Option<(String, Option<String>)> {
    for n in 1..=2 {
        let label = tags.get(&format!("twitter:label{n}"));
        let is_price_label = label.is_some_and(|l| l.to_lowercase().contains("price"));
        if !is_price_label {
            continue;
        }
        if let Some(priced) = tags.get(&format!("twitter:data{n}")).and_then(|raw| scan_price(raw)) {
            return Some(priced);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_og_title_and_product_price() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="Acme Toaster X2" />
                <meta property="product:price:amount" content="49.00" />
                <meta property="product:price:currency" content="GBP" />
            </head></html>
        "#;
        let record = extract_meta(html, "https://shop.example.com/t").unwrap();
        assert_eq!(record.product_name, "Acme Toaster X2");
        assert_eq!(record.price, "49.00");
        assert_eq!(record.currency.as_deref(), Some("GBP"));
        assert_eq!(record.link, "https://shop.example.com/t");
    }

    #[test]
    fn twitter_labeled_pair_supplies_price() {
        let html = r#"
            <head>
                <meta name="twitter:title" content="Gizmo Mini" />
                <meta name="twitter:label1" content="Price" />
                <meta name="twitter:data1" content="$15.99" />
            </head>
        "#;
        let record = extract_meta(html, "https://x.example/g").unwrap();
        assert_eq!(record.price, "15.99");
        assert_eq!(record.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn non_price_label_is_ignored() {
        let html = r#"
            <head>
                <meta name="twitter:title" content="Gizmo Mini" />
                <meta name="twitter:label1" content="Color" />
                <meta name="twitter:data1" content="Blue" />
            </head>
        "#;
        assert!(extract_meta(html, "https://x.example/g").is_none());
    }

    #[test]
    fn title_without_price_yields_none() {
        let html = r#"<head><meta property="og:title" content="Just a blog post" /></head>"#;
        assert!(extract_meta(html, "https://x.example/b").is_none());
    }

    #[test]
    fn price_without_title_yields_none() {
        let html = r#"<head><meta property="og:price:amount" content="12.00" /></head>"#;
        assert!(extract_meta(html, "https://x.example/p").is_none());
    }

    #[test]
    fn lexed_currency_used_when_no_currency_tag() {
        let html = r#"
            <head>
                <meta property="og:title" content="Chai Kettle" />
                <meta property="og:price:amount" content="₹1,299" />
            </head>
        "#;
        let record = extract_meta(html, "https://x.example/k").unwrap();
        assert_eq!(record.price, "1299");
        assert_eq!(record.currency.as_deref(), Some("INR"));
    }
}
