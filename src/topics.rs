//! Frequency-based topic extraction.
//!
//! Tokenizes on word boundaries, lowercases, drops tokens of length ≤ 3,
//! and ranks the rest by frequency. The sort is stable and descending, so
//! ties keep first-seen order. Relevance is frequency over the total
//! token count (counted before the length filter).

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::TopicResult;

/// Tokens this short never become topics.
const MIN_TOKEN_LEN: usize = 4;
/// Number of top-ranked topics kept.
const TOP_N: usize = 10;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").unwrap())
}

/// Extract the top 10 topics from `text`. Empty input yields an empty
/// list, never an error.
pub fn extract_topics(text: &str) -> Vec<TopicResult> {
    let tokens: Vec<String> = word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    let total = tokens.len();
    if total == 0 {
        return Vec::new();
    }

    // Count in first-seen order so the stable sort can break ties by
    // encounter order.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        if token.chars().count() < MIN_TOKEN_LEN {
            continue;
        }
        *counts.entry(token.clone()).or_insert_with(|| {
            order.push(token.clone());
            0
        }) += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(word, frequency)| TopicResult {
            relevance: frequency as f64 / total as f64,
            keywords: vec![word.clone()],
            word,
            frequency,
        })
        .collect()
}
