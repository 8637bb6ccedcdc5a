//! Strategy 1: schema.org JSON-LD `Product` extraction.
//!
//! Publisher-authored structured data is the highest-confidence source.
//! Malformed or absent blocks are skipped silently — never a page-level
//! failure.

use regex::Regex;

use crate::price::scan_price;
use crate::types::ExtractedRecord;

/// Extract a product record from `<script type="application/ld+json">`
/// blocks. Returns the first `Product` item carrying a name and a price.
pub(super) fn extract_structured(html: &str, url: &str) -> Option<ExtractedRecord> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    for cap in script_re.captures_iter(html) {
        let json_text = match cap.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };

        // Accept top-level object, array, or @graph container.
        let mut candidates: Vec<serde_json::Value> = if let Some(arr) = value.as_array() {
            arr.clone()
        } else {
            vec![value]
        };

        let mut expanded = Vec::new();
        for item in &candidates {
            if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                expanded.extend(graph.iter().cloned());
            }
        }
        candidates.extend(expanded);

        for item in candidates {
            if let Some(record) = product_to_record(&item, url) {
                return Some(record);
            }
        }
    }

    None
}

/// Convert a single JSON-LD object to a record, if it is a `Product` with
/// a usable name and offer price.
fn product_to_record(item: &serde_json::Value, url: &str) -> Option<ExtractedRecord> {
    // `@type` may be a plain string or an array of strings.
    let type_node = item.get("@type")?;
    let is_product = if let Some(s) = type_node.as_str() {
        s.eq_ignore_ascii_case("Product")
    } else if let Some(arr) = type_node.as_array() {
        arr.iter()
            .filter_map(|v| v.as_str())
            .any(|s| s.eq_ignore_ascii_case("Product"))
    } else {
        false
    };
    if !is_product {
        return None;
    }

    let product_name = item.get("name")?.as_str()?.trim().to_string();
    if product_name.is_empty() {
        return None;
    }

    // `offers` may be a single object or an array; take the first offer.
    let offers = item.get("offers")?;
    let offer = if let Some(arr) = offers.as_array() {
        arr.first()?
    } else {
        offers
    };

    // `price` / `lowPrice` may be a JSON string or a number.
    let raw_price = offer
        .get("price")
        .or_else(|| offer.get("lowPrice"))
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })?;
    let (price, lexed_currency) = scan_price(&raw_price)?;

    let currency = offer
        .get("priceCurrency")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or(lexed_currency);

    // "https://schema.org/InStock" → "InStock".
    let availability = offer
        .get("availability")
        .and_then(|v| v.as_str())
        .map(|s| s.rsplit('/').next().unwrap_or(s).to_string());

    let link = item
        .get("url")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
        .to_string();

    Some(ExtractedRecord {
        link,
        price,
        currency,
        product_name,
        availability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_product_with_offer() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "Product",
                "name": "Acme Blender 3000",
                "url": "https://shop.example.com/blender-3000",
                "offers": {
                    "@type": "Offer",
                    "price": "79.99",
                    "priceCurrency": "USD",
                    "availability": "https://schema.org/InStock"
                }
            }
            </script>
            </head></html>
        "#;
        let record = extract_structured(html, "https://shop.example.com/p?id=1").unwrap();
        assert_eq!(record.product_name, "Acme Blender 3000");
        assert_eq!(record.price, "79.99");
        assert_eq!(record.currency.as_deref(), Some("USD"));
        assert_eq!(record.availability.as_deref(), Some("InStock"));
        assert_eq!(record.link, "https://shop.example.com/blender-3000");
    }

    #[test]
    fn falls_back_to_fetch_url_without_canonical() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "Widget", "offers": {"price": 12.5}}
            </script>
        "#;
        let record = extract_structured(html, "https://shop.example.com/w").unwrap();
        assert_eq!(record.link, "https://shop.example.com/w");
        assert_eq!(record.price, "12.5");
        assert!(record.currency.is_none(), "bare numeric price has no currency");
    }

    #[test]
    fn uses_low_price_when_price_absent() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@type": "Product",
                "name": "Widget Pro",
                "offers": {"@type": "AggregateOffer", "lowPrice": "45999", "priceCurrency": "INR"}
            }
            </script>
        "#;
        let record = extract_structured(html, "https://x.example/p").unwrap();
        assert_eq!(record.price, "45999");
        assert_eq!(record.currency.as_deref(), Some("INR"));
    }

    #[test]
    fn accepts_offers_array_and_graph_container() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@graph": [
                    {"@type": "WebPage", "name": "About"},
                    {
                        "@type": ["Product", "Thing"],
                        "name": "Graph Widget",
                        "offers": [{"price": "5.00", "priceCurrency": "EUR"}]
                    }
                ]
            }
            </script>
        "#;
        let record = extract_structured(html, "https://x.example/p").unwrap();
        assert_eq!(record.product_name, "Graph Widget");
        assert_eq!(record.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn skips_malformed_blocks_and_non_products() {
        let html = r#"
            <script type="application/ld+json">{ not json at all</script>
            <script type="application/ld+json">{"@type": "Article", "name": "Review"}</script>
            <script type="application/ld+json">
            {"@type": "Product", "name": "Second Block Wins", "offers": {"price": "9.99"}}
            </script>
        "#;
        let record = extract_structured(html, "https://x.example/p").unwrap();
        assert_eq!(record.product_name, "Second Block Wins");
    }

    #[test]
    fn product_without_offers_is_skipped() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "No Offer Widget"}
            </script>
        "#;
        assert!(extract_structured(html, "https://x.example/p").is_none());
    }
}
