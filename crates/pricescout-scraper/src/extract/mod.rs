//! Product extraction cascade.
//!
//! Tries extraction strategies in priority order (JSON-LD structured data,
//! OpenGraph/product meta tags, site-specific selectors, generic CSS
//! heuristics) and returns the first record carrying both a name and a
//! price. A miss is a normal outcome, not an error.

mod generic;
mod meta;
mod sites;
mod structured;

use crate::types::ExtractedRecord;

/// Run the strategy cascade against a fetched page.
///
/// Short-circuits at the first strategy producing a record with a non-empty
/// name and price. The record's `link` defaults to the fetch URL unless the
/// structured data declared a canonical product URL.
#[must_use]
pub fn extract_product(html: &str, url: &str) -> Option<ExtractedRecord> {
    if let Some(record) = structured::extract_structured(html, url) {
        tracing::debug!(url, strategy = "structured", name = %record.product_name, "extracted product");
        return Some(record);
    }

    if let Some(record) = meta::extract_meta(html, url) {
        tracing::debug!(url, strategy = "meta", name = %record.product_name, "extracted product");
        return Some(record);
    }

    if let Some(record) = sites::extract_site_specific(html, url) {
        tracing::debug!(url, strategy = "site", name = %record.product_name, "extracted product");
        return Some(record);
    }

    if let Some(record) = generic::extract_generic(html, url) {
        tracing::debug!(url, strategy = "generic", name = %record.product_name, "extracted product");
        return Some(record);
    }

    tracing::debug!(url, "no extraction strategy matched");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// JSON-LD must win even when meta tags and generic markup are present.
    #[test]
    fn structured_data_takes_priority() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="Meta Title Widget" />
                <meta property="og:price:amount" content="99.99" />
                <script type="application/ld+json">
                {"@type": "Product", "name": "Structured Widget", "offers": {"price": "10.00", "priceCurrency": "USD"}}
                </script>
            </head><body>
                <h1>Generic Heading Widget</h1>
                <span class="price">$55.00</span>
            </body></html>
        "#;
        let record = extract_product(html, "https://x.example/w").unwrap();
        assert_eq!(record.product_name, "Structured Widget");
        assert_eq!(record.price, "10.00");
    }

    #[test]
    fn meta_tags_beat_generic_markup() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="Meta Title Widget" />
                <meta property="og:price:amount" content="99.99" />
            </head><body>
                <h1>Generic Heading Widget</h1>
                <span class="price">$55.00</span>
            </body></html>
        "#;
        let record = extract_product(html, "https://x.example/w").unwrap();
        assert_eq!(record.product_name, "Meta Title Widget");
        assert_eq!(record.price, "99.99");
    }

    #[test]
    fn generic_heuristics_are_the_last_resort() {
        let html = r#"
            <html><body>
                <h1>Plain Shop Widget</h1>
                <span class="price">$55.00</span>
            </body></html>
        "#;
        let record = extract_product(html, "https://x.example/w").unwrap();
        assert_eq!(record.product_name, "Plain Shop Widget");
        assert_eq!(record.price, "55.00");
    }

    #[test]
    fn empty_page_extracts_nothing() {
        assert!(extract_product("<html><body></body></html>", "https://x.example/e").is_none());
    }

    /// Broken structured data falls through to the next strategy instead of
    /// failing the page.
    #[test]
    fn malformed_jsonld_falls_through_to_meta() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{"@type": "Product", "name": </script>
                <meta property="og:title" content="Fallback Widget" />
                <meta property="product:price:amount" content="12.00" />
            </head></html>
        "#;
        let record = extract_product(html, "https://x.example/f").unwrap();
        assert_eq!(record.product_name, "Fallback Widget");
    }
}
