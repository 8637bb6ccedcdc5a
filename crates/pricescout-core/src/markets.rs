//! Country → currency and location lookup table.
//!
//! Mirrors the markets supported by the discovery layer. Unknown country
//! codes fall back to the United States / USD; this is a known
//! precision/coverage trade-off (results from non-USD markets without a
//! currency marker get tagged USD) rather than something to silently fix
//! per-market.

/// Default ISO 4217 currency code for a country, used to backfill results
/// whose page markup carried no currency marker.
#[must_use]
pub fn default_currency(country: &str) -> &'static str {
    match country.to_ascii_uppercase().as_str() {
        "IN" => "INR",
        "UK" | "GB" => "GBP",
        "CA" => "CAD",
        "AU" => "AUD",
        "DE" | "FR" => "EUR",
        "JP" => "JPY",
        "CN" => "CNY",
        _ => "USD",
    }
}

/// Full country name in the form the search API expects as a `location`
/// parameter.
#[must_use]
pub fn location_name(country: &str) -> &'static str {
    match country.to_ascii_uppercase().as_str() {
        "IN" => "India",
        "UK" | "GB" => "United Kingdom",
        "CA" => "Canada",
        "AU" => "Australia",
        "DE" => "Germany",
        "FR" => "France",
        "JP" => "Japan",
        "CN" => "China",
        _ => "United States",
    }
}
