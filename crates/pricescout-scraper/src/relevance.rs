//! Query ↔ product-name relevance scoring.

use std::collections::HashSet;

/// Similarity score in `[0.0, 1.0]` between a search query and an extracted
/// product name.
///
/// Full-query substring containment is the strongest signal and scores 1.0
/// outright. Otherwise the score is the fraction of query tokens present in
/// the product name, with a 0.3 bonus per matched token that carries a digit
/// — model numbers and capacities discriminate far better than brand words.
#[must_use]
pub fn similarity(query: &str, product_name: &str) -> f64 {
    if product_name.trim().is_empty() {
        return 0.0;
    }

    let query_lower = query.to_lowercase();
    let name_lower = product_name.to_lowercase();

    let query_trimmed = query_lower.trim();
    if !query_trimmed.is_empty() && name_lower.contains(query_trimmed) {
        return 1.0;
    }

    let query_tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if query_tokens.is_empty() {
        return 0.0;
    }
    let name_tokens: HashSet<&str> = name_lower.split_whitespace().collect();

    let mut matched = 0usize;
    let mut digit_bonus = 0.0f64;
    for token in &query_tokens {
        if name_tokens.contains(token) {
            matched += 1;
            if token.chars().any(|c| c.is_ascii_digit()) {
                digit_bonus += 0.3;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let overlap = matched as f64 / query_tokens.len() as f64;
    (overlap + digit_bonus).min(1.0)
}
