//! Provider response normalization.
//!
//! Providers return JSON-shaped or free text; this module turns either
//! into one [`Section`] per requested field, never failing. The parse
//! fallback chain is modeled explicitly as [`ParsedResponse`] rather than
//! an exception path: strict JSON first, then a `"key": "value"` regex
//! extraction, then the whole raw text as free text.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Section;

/// Placeholder used when a response carries no usable content at all.
pub const PLACEHOLDER: &str = "No content was returned for this section.";

/// Section confidence by parse path, fixed at normalization time.
const CONF_STRUCTURED: f64 = 0.9;
const CONF_FIELD_EXTRACTED: f64 = 0.75;
const CONF_FREE_TEXT: f64 = 0.5;

/// Minimum sentence length (chars) for key-point extraction.
const KEY_POINT_MIN_CHARS: usize = 20;
/// Maximum key points kept per section.
const KEY_POINT_MAX: usize = 5;

/// Outcome of parsing one raw provider response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// Strict JSON object (possibly recovered field-by-field via regex).
    Structured(serde_json::Map<String, serde_json::Value>),
    /// Nothing JSON-shaped; the raw text stands in as a whole.
    FreeText(String),
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```(?:json)?\s*(.*?)\s*```$").unwrap())
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "key": "value" with escaped quotes allowed inside the value.
    RE.get_or_init(|| Regex::new(r#""([A-Za-z_][A-Za-z0-9_]*)"\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap())
}

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

/// Strip a surrounding markdown code fence, if any. Providers often wrap
/// JSON answers in ```json fences.
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match fence_re().captures(trimmed) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(trimmed),
        None => trimmed,
    }
}

/// Parse a raw response: strict JSON object → regex field recovery →
/// free text. Always succeeds.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let body = strip_fence(raw);

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        return ParsedResponse::Structured(map);
    }

    let mut recovered = serde_json::Map::new();
    for caps in field_re().captures_iter(body) {
        let key = caps[1].to_string();
        let value = caps[2].replace("\\\"", "\"").replace("\\n", "\n");
        recovered
            .entry(key)
            .or_insert(serde_json::Value::String(value));
    }
    if !recovered.is_empty() {
        return ParsedResponse::Structured(recovered);
    }

    ParsedResponse::FreeText(raw.trim().to_string())
}

/// Normalize one raw provider response into the section for `key`.
///
/// Missing data degrades to [`PLACEHOLDER`] content rather than an error;
/// the section's word count is always the tokenization of its own content.
pub fn normalize(raw: &str, key: &str, title: &str) -> Section {
    let (content, confidence) = match parse_response(raw) {
        ParsedResponse::Structured(map) => {
            let field = map
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string());
            match field {
                Some(text) if !text.is_empty() => (text, CONF_STRUCTURED),
                // JSON arrived but without our field: recover whatever
                // string content it does carry, else placeholder.
                _ => match first_string_value(&map) {
                    Some(text) => (text, CONF_FIELD_EXTRACTED),
                    None => (PLACEHOLDER.to_string(), CONF_FREE_TEXT),
                },
            }
        }
        ParsedResponse::FreeText(text) => {
            if text.is_empty() {
                (PLACEHOLDER.to_string(), CONF_FREE_TEXT)
            } else {
                (text, CONF_FREE_TEXT)
            }
        }
    };

    let word_count = content.split_whitespace().count();
    let key_points = extract_key_points(&content);

    Section {
        key: key.to_string(),
        title: title.to_string(),
        content,
        confidence,
        word_count,
        key_points,
        citations: Vec::new(),
    }
}

fn first_string_value(map: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    map.values()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Split on sentence-ending punctuation, keep sentences longer than 20
/// characters, take the first 5, trimmed.
pub fn extract_key_points(content: &str) -> Vec<String> {
    sentence_re()
        .split(content)
        .map(|s| s.trim())
        .filter(|s| s.chars().count() > KEY_POINT_MIN_CHARS)
        .take(KEY_POINT_MAX)
        .map(|s| s.to_string())
        .collect()
}
