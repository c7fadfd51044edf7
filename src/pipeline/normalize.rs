//! Text normalization: idempotent cleanup of raw extracted text.
//!
//! PDF text extraction routinely glues tokens together ("AAPL150shares",
//! "totalValue") and leaks markdown-significant characters into plain text.
//! This module applies a fixed sequence of cheap regex rules that undo
//! those artifacts without touching the underlying values.
//!
//! ## Rule Order
//!
//! Markdown-character stripping runs first: removing `*` from `a*B` glues a
//! new word boundary that the spacing rules must still see. Spacing
//! insertions then run before whitespace collapse so a rule can insert a
//! space next to an existing one without leaving doubles.
//!
//! Every rule is a fixpoint on its own output, so the whole pass is
//! idempotent: `normalize(normalize(s)) == normalize(s)`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_DIGIT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)([A-Za-z])").unwrap());
static RE_LETTER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z])(\d)").unwrap());
static RE_CURRENCY_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\$)([A-Za-z])").unwrap());
static RE_CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_MARKDOWN_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_`#]").unwrap());

/// Clean raw extracted text.
///
/// Rules, applied in order:
/// 1. Strip markdown control characters (`*`, `_`, `` ` ``, `#`)
/// 2. Insert a space between a digit and an adjacent letter (both ways)
/// 3. Insert a space between a currency symbol and a following letter
/// 4. Insert a space at lowercase→uppercase boundaries (heuristic
///    de-concatenation of words glued during extraction)
/// 5. Collapse any whitespace run to a single space
///
/// Empty input is returned unchanged. Never fails.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let s = RE_MARKDOWN_CHARS.replace_all(text, "");
    let s = RE_DIGIT_LETTER.replace_all(&s, "$1 $2");
    let s = RE_LETTER_DIGIT.replace_all(&s, "$1 $2");
    let s = RE_CURRENCY_LETTER.replace_all(&s, "$1 $2");
    let s = RE_CAMEL_BOUNDARY.replace_all(&s, "$1 $2");
    let s = RE_WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

/// Like [`normalize`] but keeps line structure: each line is normalized on
/// its own so the classifier can still walk the page line by line.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_digits_from_letters() {
        assert_eq!(normalize("AAPL150shares"), "AAPL 150 shares");
        assert_eq!(normalize("10shares"), "10 shares");
    }

    #[test]
    fn separates_currency_from_letters() {
        assert_eq!(normalize("$USD"), "$ USD");
    }

    #[test]
    fn splits_glued_words() {
        assert_eq!(normalize("totalValue"), "total Value");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("a   b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn strips_markdown_characters() {
        assert_eq!(normalize("**bold** _em_ `code` #h"), "bold em code h");
    }

    #[test]
    fn empty_input_unchanged() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "plain text with no matches",
            "AAPL150shares costs$1,234.56perLot",
            "**md** and    spaced\u{a0}out",
            "lowerUPPER 9x y9 $x",
            "a*Bc#9d",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn normalize_lines_keeps_structure_and_drops_blanks() {
        let lines = normalize_lines("Dividend income\n\n  \nBuy10shares");
        assert_eq!(lines, vec!["Dividend income", "Buy 10 shares"]);
    }
}
