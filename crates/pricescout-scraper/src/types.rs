/// Classified outcome of fetching one candidate page.
///
/// Produced exactly once per candidate; never retried inside this crate.
/// Every non-`Success` variant is terminal for that candidate only.
#[derive(Debug)]
pub enum FetchOutcome {
    Success { body: String, final_url: String },
    HttpStatus { status: u16 },
    Timeout,
    Network { message: String },
}

/// Strategy-local product record, pre-normalization.
///
/// `price` is the lexer's numeric string (separators stripped); `currency`
/// is `None` when the page carried no currency marker and is backfilled
/// from the market table by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub link: String,
    pub price: String,
    pub currency: Option<String>,
    pub product_name: String,
    pub availability: Option<String>,
}
