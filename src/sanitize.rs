//! Raw text sanitization.
//!
//! Every stage that touches raw document bytes goes through [`sanitize`]
//! first: control characters and escaped-Unicode control sequences are
//! removed, whitespace runs collapse to single spaces, and the result is
//! trimmed. The function is idempotent and never fails — malformed input
//! degrades to an empty string, not an error.

use regex::Regex;
use std::sync::OnceLock;

/// Fallback title when sanitization leaves nothing behind.
pub const UNTITLED: &str = "Untitled Document";

/// Maximum length for sanitized titles, in characters.
const TITLE_MAX_CHARS: usize = 255;

fn escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\u([0-9a-fA-F]{4})").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Codepoints stripped as control characters: 0x00–0x08, 0x0B, 0x0C,
/// 0x0E–0x1F, 0x7F. Tab, LF, and CR survive here and are folded by the
/// whitespace collapse instead.
fn is_stripped_control(cp: u32) -> bool {
    matches!(cp, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F)
}

/// Remove control characters and invalid escape sequences, collapse
/// whitespace, and trim. Idempotent: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(text: &str) -> String {
    // Raw control characters go first: removing one that splits an escape
    // (a NUL between `\u` and its digits) exposes a fresh escape, which
    // the pass below must still see.
    let without_controls: String = text
        .chars()
        .filter(|c| !is_stripped_control(*c as u32))
        .collect();

    // Literal `\uXXXX` escapes naming a control codepoint are dropped
    // whole; all other escapes pass through untouched. Removal can itself
    // expose a new escape (`\u\u00000000`), so run to a fixpoint.
    let mut without_escapes = without_controls;
    loop {
        let pass = escape_re()
            .replace_all(&without_escapes, |caps: &regex::Captures| {
                let cp = u32::from_str_radix(&caps[1], 16).unwrap_or(0);
                if is_stripped_control(cp) {
                    String::new()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
        if pass == without_escapes {
            break;
        }
        without_escapes = pass;
    }

    whitespace_re()
        .replace_all(&without_escapes, " ")
        .trim()
        .to_string()
}

/// Sanitize a document title: [`sanitize`], truncate to 255 characters,
/// and substitute [`UNTITLED`] when nothing remains.
pub fn sanitize_title(text: &str) -> String {
    let clean = sanitize(text);
    let truncated: String = clean.chars().take(TITLE_MAX_CHARS).collect();
    if truncated.is_empty() {
        UNTITLED.to_string()
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        let input = "he\u{0000}llo\u{0001} wor\u{007F}ld\u{001F}";
        assert_eq!(sanitize(input), "hello world");
    }

    #[test]
    fn preserves_tabs_and_newlines_as_spaces() {
        assert_eq!(sanitize("a\tb\nc\r\nd"), "a b c d");
    }

    #[test]
    fn strips_escaped_control_sequences() {
        assert_eq!(sanitize(r"he\u0000llo \u001f world"), "hello world");
        // Non-control escapes survive.
        assert_eq!(sanitize(r"caf\u00e9"), r"caf\u00e9");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(sanitize("   a   b \n\n  c  "), "a b c");
    }

    #[test]
    fn idempotent() {
        let cases = [
            "plain text",
            "  spaced   out  ",
            "ctrl\u{0007}chars\u{000B}here",
            r"esc\u0008aped",
            r"\u\u00000000",
            "\\u\u{0000}0000",
            "",
            "\u{0000}\u{0001}",
        ];
        for case in cases {
            let once = sanitize(case);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", case);
        }
    }

    #[test]
    fn control_char_splitting_an_escape_still_sanitizes_fully() {
        // A raw NUL between `\u` and its digits: stripping the NUL exposes
        // `\u0000`, which must also be removed in the same call.
        assert_eq!(sanitize("\\u\u{0000}0000"), "");
        assert_eq!(sanitize("a \\u\u{0000}0000 b"), "a b");
    }

    #[test]
    fn no_control_chars_in_output() {
        let input: String = (0u32..128).filter_map(char::from_u32).collect();
        let out = sanitize(&input);
        assert!(!out.chars().any(|c| is_stripped_control(c as u32)));
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("\u{0000}"), "");
    }

    #[test]
    fn title_fallback_and_truncation() {
        assert_eq!(sanitize_title("\u{0001}\u{0002}"), UNTITLED);
        assert_eq!(sanitize_title("  Quarterly Report  "), "Quarterly Report");
        let long = "x".repeat(500);
        assert_eq!(sanitize_title(&long).chars().count(), 255);
    }
}
