//! Price/currency lexer.
//!
//! Scans free-form price text for a currency marker (symbol or ISO 4217
//! code) co-located with a numeric token, strips thousands separators, and
//! returns the normalized amount. Currency is reported as `None` when no
//! marker is present — the aggregator backfills from the market table, so
//! this module never invents "USD" on its own.

use regex::Regex;

/// Scan `text` for a price. Returns the normalized numeric string and the
/// currency code implied by an adjacent marker, or `None` when no numeric
/// token matches any of the ordered patterns.
#[must_use]
pub fn scan_price(text: &str) -> Option<(String, Option<String>)> {
    // Symbol immediately before the number: "$12.50", "₹ 45,999".
    let symbol_first = Regex::new(r"(₹|\$|£|€|¥)\s*([0-9][0-9.,]*)").expect("valid regex");
    if let Some(cap) = symbol_first.captures(text) {
        if let Some(amount) = normalize_amount(&cap[2]) {
            return Some((amount, Some(symbol_currency(&cap[1]).to_string())));
        }
    }

    // ISO code before the number: "USD 12.50", "INR 45999".
    let code_first =
        Regex::new(r"\b(USD|INR|GBP|EUR|JPY|CNY|CAD|AUD)\s*([0-9][0-9.,]*)").expect("valid regex");
    if let Some(cap) = code_first.captures(text) {
        if let Some(amount) = normalize_amount(&cap[2]) {
            return Some((amount, Some(cap[1].to_string())));
        }
    }

    // Number followed by a code or symbol: "12.50 USD", "45999₹".
    let code_last = Regex::new(r"([0-9][0-9.,]*)\s*(USD|INR|GBP|EUR|JPY|CNY|CAD|AUD|₹|\$|£|€|¥)")
        .expect("valid regex");
    if let Some(cap) = code_last.captures(text) {
        if let Some(amount) = normalize_amount(&cap[1]) {
            let marker = &cap[2];
            let currency = if marker.chars().all(char::is_alphabetic) {
                marker.to_string()
            } else {
                symbol_currency(marker).to_string()
            };
            return Some((amount, Some(currency)));
        }
    }

    // Bare numeric token, no marker: "45999.00". Currency stays unknown.
    let bare = Regex::new(r"([0-9]+(?:[.,][0-9]+)*)").expect("valid regex");
    if let Some(cap) = bare.captures(text) {
        if let Some(amount) = normalize_amount(&cap[1]) {
            return Some((amount, None));
        }
    }

    None
}

fn symbol_currency(symbol: &str) -> &'static str {
    match symbol {
        "₹" => "INR",
        "£" => "GBP",
        "€" => "EUR",
        "¥" => "JPY",
        _ => "USD",
    }
}

/// Normalize a raw numeric token: strip thousands separators, keep the
/// decimal point. Returns `None` unless the result parses as a finite
/// non-negative decimal.
fn normalize_amount(raw: &str) -> Option<String> {
    let raw = raw.trim_matches(|c| c == '.' || c == ',');
    if raw.is_empty() {
        return None;
    }

    let dots = raw.matches('.').count();
    let commas = raw.matches(',').count();

    let normalized = if dots > 0 && commas > 0 {
        // The last-occurring separator is the decimal mark.
        if raw.rfind('.') > raw.rfind(',') {
            raw.replace(',', "")
        } else {
            raw.replace('.', "").replace(',', ".")
        }
    } else if commas > 0 {
        // A single comma with exactly two trailing digits reads as a decimal
        // mark ("12,50"); anything else is grouping ("45,999", "1,234,567").
        let after = raw.rsplit(',').next().unwrap_or("");
        if commas == 1 && after.len() == 2 {
            raw.replace(',', ".")
        } else {
            raw.replace(',', "")
        }
    } else if dots > 1 {
        // Multiple dots can only be grouping.
        raw.replace('.', "")
    } else {
        raw.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(normalized),
        _ => None,
    }
}
