//! Regex-based entity extraction.
//!
//! Stateless scan over sanitized text for dates, percentages, and
//! currency amounts. Each match carries a fixed confidence and a
//! ±50-character context window around the span.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{EntityKind, EntityResult};

/// Context window radius, in characters.
const CONTEXT_RADIUS: usize = 50;

const CONF_DATE: f64 = 0.8;
const CONF_PERCENTAGE: f64 = 0.9;
const CONF_MONEY: f64 = 0.9;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap())
}

fn percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d+(?:\.\d+)?%").unwrap())
}

fn money_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Integer part is `\d+`, not `\d{1,3}`: ungrouped amounts like
    // `$123456` match whole instead of stopping after three digits.
    RE.get_or_init(|| Regex::new(r"\$\d+(?:,\d{3})*(?:\.\d{2})?").unwrap())
}

/// Extract all recognized entities from `text`, in scan order per kind:
/// dates, then percentages, then money.
pub fn extract_entities(text: &str) -> Vec<EntityResult> {
    let mut entities = Vec::new();
    scan(text, date_re(), EntityKind::Date, CONF_DATE, &mut entities);
    scan(
        text,
        percent_re(),
        EntityKind::Percentage,
        CONF_PERCENTAGE,
        &mut entities,
    );
    scan(text, money_re(), EntityKind::Money, CONF_MONEY, &mut entities);
    entities
}

fn scan(text: &str, re: &Regex, kind: EntityKind, confidence: f64, out: &mut Vec<EntityResult>) {
    for m in re.find_iter(text) {
        out.push(EntityResult {
            text: m.as_str().to_string(),
            kind,
            confidence,
            context: context_window(text, m.start(), m.end()),
        });
    }
}

/// Substring of up to 50 characters on each side of the span, clamped to
/// char boundaries so multibyte text never splits a codepoint.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut lo = start;
    for _ in 0..CONTEXT_RADIUS {
        if lo == 0 {
            break;
        }
        lo -= 1;
        while lo > 0 && !text.is_char_boundary(lo) {
            lo -= 1;
        }
    }
    let mut hi = end;
    for _ in 0..CONTEXT_RADIUS {
        if hi >= text.len() {
            break;
        }
        hi += 1;
        while hi < text.len() && !text.is_char_boundary(hi) {
            hi += 1;
        }
    }
    text[lo..hi].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_sentence_yields_exactly_three_entities() {
        let text = "Revenue grew 12.5% to $1,250.00 on 03/14/2024";
        let entities = extract_entities(text);

        let percents: Vec<&EntityResult> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Percentage)
            .collect();
        let monies: Vec<&EntityResult> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Money)
            .collect();
        let dates: Vec<&EntityResult> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Date)
            .collect();

        assert_eq!(percents.len(), 1);
        assert_eq!(percents[0].text, "12.5%");
        assert_eq!(percents[0].confidence, 0.9);

        assert_eq!(monies.len(), 1);
        assert_eq!(monies[0].text, "$1,250.00");
        assert_eq!(monies[0].confidence, 0.9);

        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].text, "03/14/2024");
        assert_eq!(dates[0].confidence, 0.8);
    }

    #[test]
    fn context_window_is_bounded() {
        let pad = "x".repeat(200);
        let text = format!("{} 50% {}", pad, pad);
        let entities = extract_entities(&text);
        assert_eq!(entities.len(), 1);
        // span (3) + 50 on each side
        assert!(entities[0].context.chars().count() <= 103);
        assert!(entities[0].context.contains("50%"));
    }

    #[test]
    fn context_window_respects_char_boundaries() {
        let text = format!("{} $5.00 {}", "é".repeat(60), "é".repeat(60));
        let entities = extract_entities(&text);
        assert_eq!(entities.len(), 1);
        assert!(entities[0].context.contains("$5.00"));
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        assert!(extract_entities("nothing numeric here").is_empty());
        assert!(extract_entities("").is_empty());
    }

    #[test]
    fn dashed_dates_and_plain_money() {
        let entities = extract_entities("Due 1-2-26, fee $40");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Date && e.text == "1-2-26"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Money && e.text == "$40"));
    }

    #[test]
    fn ungrouped_money_amounts_match_whole() {
        let entities = extract_entities("paid $123456 up front");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Money);
        assert_eq!(entities[0].text, "$123456");
    }
}
