//! Strategy 3: hand-tuned selectors for known marketplace domains.
//!
//! The big marketplaces bury price and title in obfuscated or noisy markup
//! that defeats the generic heuristics, so a small allow-list gets
//! selectors tuned per site. Everything else falls through to strategy 4.

use scraper::{Html, Selector};

use crate::price::scan_price;
use crate::types::ExtractedRecord;

struct SiteRules {
    /// Substring match against the lowercased page host.
    domain: &'static str,
    name_selectors: &'static [&'static str],
    price_selectors: &'static [&'static str],
}

const SITE_RULES: &[SiteRules] = &[
    SiteRules {
        domain: "amazon.",
        name_selectors: &["#productTitle", "#title"],
        price_selectors: &[
            ".a-price .a-offscreen",
            "#priceblock_ourprice",
            "#priceblock_dealprice",
            "#corePrice_feature_div .a-offscreen",
        ],
    },
    SiteRules {
        domain: "flipkart.com",
        name_selectors: &["span.B_NuCI", "span.VU-ZEz", "h1._6EBuvT"],
        price_selectors: &["div._30jeq3", "div.Nx9bqj", "div._16Jk6d"],
    },
    SiteRules {
        domain: "ebay.",
        name_selectors: &[".x-item-title__mainTitle span", "h1.it-ttl"],
        price_selectors: &[".x-price-primary .ux-textspans", "span#prcIsum"],
    },
    SiteRules {
        domain: "walmart.com",
        name_selectors: &[r#"h1[itemprop="name"]"#],
        price_selectors: &[r#"span[itemprop="price"]"#, r#"[data-testid="price-wrap"] span"#],
    },
    SiteRules {
        domain: "bestbuy.com",
        name_selectors: &[".sku-title h1", "h1.heading-5"],
        price_selectors: &[".priceView-customer-price span", ".priceView-hero-price span"],
    },
];

pub(super) fn extract_site_specific(html: &str, url: &str) -> Option<ExtractedRecord> {
    let host = page_host(url)?;
    let rules = SITE_RULES.iter().find(|r| host.contains(r.domain))?;

    let document = Html::parse_document(html);

    let product_name = rules
        .name_selectors
        .iter()
        .find_map(|s| element_text(&document, s))
        .filter(|name| !name.is_empty())?;

    let (price, currency) = rules
        .price_selectors
        .iter()
        .find_map(|s| element_text(&document, s).as_deref().and_then(scan_price))?;

    Some(ExtractedRecord {
        link: url.to_string(),
        price,
        currency,
        product_name,
        availability: None,
    })
}

fn element_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<Vec<_>>().join(" ");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn page_host(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
}
