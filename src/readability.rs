//! Approximate Flesch Reading Ease scoring.
//!
//! `206.835 − 1.015·(words/sentences) − 84.6·(syllables/words)`, with
//! syllables counted as vowel-group runs per token (minimum one per
//! token). The result is clamped to [0, 100]; zero words or zero
//! sentences score 0.

use regex::Regex;
use std::sync::OnceLock;

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

/// Flesch Reading Ease estimate in [0, 100].
pub fn readability_score(text: &str) -> f64 {
    let sentences = sentence_re()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let words: Vec<&str> = text.split_whitespace().collect();

    if sentences == 0 || words.is_empty() {
        return 0.0;
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let score = 206.835
        - 1.015 * (words.len() as f64 / sentences as f64)
        - 84.6 * (syllables as f64 / words.len() as f64);

    score.clamp(0.0, 100.0)
}

/// Vowel-group runs in a token, minimum 1.
fn count_syllables(word: &str) -> usize {
    let mut groups = 0usize;
    let mut in_group = false;
    for c in word.to_lowercase().chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_group {
            groups += 1;
        }
        in_group = is_vowel;
    }
    groups.max(1)
}
