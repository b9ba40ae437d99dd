//! Lexicon-based sentiment scoring.
//!
//! Lowercase whitespace tokens are matched by **substring** against fixed
//! positive/negative lexicons — `"risks."` matches `"risk"`, but so would
//! an unrelated token containing a lexicon word. This reproduces the
//! behavior of the system this pipeline was ported from; whole-word
//! matching would change established classifications, so the substring
//! semantics are kept deliberately.
//!
//! Ratios are computed over matched tokens only (0.5/0.5 when none match)
//! and the three distribution fractions always sum to 1.

use crate::models::{SentimentLabel, SentimentResult};

const POSITIVE_LEXICON: &[&str] = &[
    "good",
    "great",
    "positive",
    "beneficial",
    "improve",
    "advantage",
    "effective",
    "happy",
    "valuable",
    "opportunity",
];

const NEGATIVE_LEXICON: &[&str] = &[
    "bad",
    "poor",
    "negative",
    "risk",
    "problem",
    "fail",
    "loss",
    "concern",
    "difficult",
    "harm",
];

/// Label thresholds: a single-sided ratio above this wins outright.
const DOMINANT: f64 = 0.6;
/// Both sides above this (without a dominant side) reads as mixed.
const MIXED_FLOOR: f64 = 0.3;

/// Score `text` against the fixed lexicons. Never fails; text with no
/// lexicon hits comes back neutral with a 0.5/0.5 split.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let lower = text.to_lowercase();

    let mut positive_hits = 0usize;
    let mut negative_hits = 0usize;
    for token in lower.split_whitespace() {
        if POSITIVE_LEXICON.iter().any(|w| token.contains(w)) {
            positive_hits += 1;
        }
        if NEGATIVE_LEXICON.iter().any(|w| token.contains(w)) {
            negative_hits += 1;
        }
    }

    let matched = positive_hits + negative_hits;
    let (positive, negative) = if matched == 0 {
        (0.5, 0.5)
    } else {
        (
            positive_hits as f64 / matched as f64,
            negative_hits as f64 / matched as f64,
        )
    };
    let neutral = 1.0 - positive - negative;

    // No hits at all is neutral outright; the 0.5/0.5 default would
    // otherwise read as mixed through the threshold chain below.
    let label = if matched == 0 {
        SentimentLabel::Neutral
    } else if positive > DOMINANT {
        SentimentLabel::Positive
    } else if negative > DOMINANT {
        SentimentLabel::Negative
    } else if positive > MIXED_FLOOR && negative > MIXED_FLOOR {
        SentimentLabel::Mixed
    } else {
        SentimentLabel::Neutral
    };

    let confidence = positive.max(negative);

    SentimentResult {
        label,
        confidence,
        emotional_tones: tones_for(label),
        positive,
        negative,
        neutral,
    }
}

fn tones_for(label: SentimentLabel) -> Vec<String> {
    let tones: &[&str] = match label {
        SentimentLabel::Positive => &["optimistic", "confident"],
        SentimentLabel::Negative => &["pessimistic", "cautious"],
        SentimentLabel::Mixed => &["ambivalent"],
        SentimentLabel::Neutral => &["balanced"],
    };
    tones.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_one(r: &SentimentResult) {
        assert!(
            (r.positive + r.negative + r.neutral - 1.0).abs() < 1e-9,
            "fractions {} + {} + {} != 1",
            r.positive,
            r.negative,
            r.neutral
        );
    }

    #[test]
    fn golden_mixed_classification() {
        // One positive substring hit ("great") and one negative ("risks"
        // contains "risk") land at 0.5/0.5 — both above the mixed floor.
        let text = "The project was a great success with excellent results. \
                    However, there were some risks.";
        let r = analyze_sentiment(text);
        assert_eq!(r.label, SentimentLabel::Mixed);
        assert_sums_to_one(&r);
    }

    #[test]
    fn dominant_positive() {
        let r = analyze_sentiment("A good, effective, and beneficial outcome with one concern.");
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!(r.positive > 0.6);
        assert_sums_to_one(&r);
    }

    #[test]
    fn dominant_negative() {
        let r = analyze_sentiment("Poor execution, repeated failures, and mounting losses.");
        assert_eq!(r.label, SentimentLabel::Negative);
        assert_sums_to_one(&r);
    }

    #[test]
    fn no_hits_is_neutral_with_even_split() {
        let r = analyze_sentiment("The meeting is on Tuesday in the main room.");
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.positive, 0.5);
        assert_eq!(r.negative, 0.5);
        assert_sums_to_one(&r);
        assert_eq!(analyze_sentiment("").label, SentimentLabel::Neutral);
    }

    #[test]
    fn substring_matching_is_intentional() {
        // "risky" is not in the lexicon but contains "risk".
        let r = analyze_sentiment("a risky venture");
        assert!(r.negative > 0.0);
    }

    #[test]
    fn fractions_sum_to_one_for_assorted_inputs() {
        for text in [
            "",
            "great",
            "bad bad bad",
            "good bad good bad",
            "nothing sentimental whatsoever",
        ] {
            assert_sums_to_one(&analyze_sentiment(text));
        }
    }
}
