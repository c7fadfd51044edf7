//! Response sanitization: deterministic cleanup of model-generated text.
//!
//! Even with a "plain text only" instruction, models leak markdown
//! emphasis, open with meta-commentary ("Here's a summary of..."), and
//! space numbers inconsistently. This module applies a fixed sequence of
//! regex/string rules that enforce a consistent display form without ever
//! altering a numeric value or currency amount — only the spacing and
//! punctuation around them.
//!
//! Like the text normalizer, the whole pass is idempotent; lead-in removal
//! loops to a fixpoint so stacked boilerplate cannot survive one call and
//! then change the result of a second.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LEAD_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:here(?:'|’)?s[^:.,\n]*|here (?:is|are)[^:.,\n]*|based on[^:.,\n]*|in summary)[:.,]?\s*")
        .unwrap()
});
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());
static RE_LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-*•>]\s+)+").unwrap());
static RE_CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$\d[\d,]*(?:\.\d+)?)").unwrap());
static RE_PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?%)").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,;:!?])").unwrap());
static RE_SENTENCE_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([.!?])([A-Za-z])").unwrap());
static RE_CLAUSE_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([,;:])([A-Za-z])").unwrap());

/// Clean model output into consistent display text.
///
/// Rules, applied in order:
/// 1. Strip boilerplate lead-ins ("Here's…", "Based on…", "In summary…"),
///    repeated until none remain
/// 2. Unwrap markdown bold/italic/code, strip heading markers
/// 3. Strip leading list and quote symbols per line
/// 4. Re-space currency and percentage tokens
/// 5. Collapse whitespace
/// 6. Fix spacing around sentence punctuation (space-after is inserted
///    only next to letters, so decimals and thousands separators are
///    never touched)
/// 7. Capitalize the first letter of each sentence
///
/// Empty input returns empty output; the sanitizer never fails.
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // 1. Lead-ins, to a fixpoint.
    let mut s = text.to_string();
    loop {
        let stripped = RE_LEAD_IN.replace(&s, "").into_owned();
        if stripped == s {
            break;
        }
        s = stripped;
    }

    // 2. Markdown artifacts.
    let s = RE_BOLD.replace_all(&s, "$1");
    let s = RE_ITALIC.replace_all(&s, "$1");
    let s = RE_CODE.replace_all(&s, "$1");
    let s = RE_HEADING.replace_all(&s, "");

    // 3. List/quote markers.
    let s = RE_LIST_MARKER.replace_all(&s, "");

    // 4. Number spacing. The captured token is the full amount, so the
    // digits themselves pass through untouched.
    let s = RE_CURRENCY.replace_all(&s, " $1 ");
    let s = RE_PERCENT.replace_all(&s, " $1 ");

    // 5–6. Whitespace and punctuation spacing.
    let s = RE_WHITESPACE.replace_all(&s, " ");
    let s = RE_SPACE_BEFORE_PUNCT.replace_all(&s, "$1");
    let s = RE_SENTENCE_GAP.replace_all(&s, "$1$2 $3");
    let s = RE_CLAUSE_GAP.replace_all(&s, "$1 $2");

    // 7. Sentence capitalization.
    capitalize_sentences(s.trim())
}

/// Uppercase the first alphabetic character of the text and of every
/// sentence following terminal punctuation.
fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_start = true;
    for c in text.chars() {
        if at_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_start = false;
        } else {
            if matches!(c, '.' | '!' | '?') {
                at_start = true;
            } else if c.is_alphanumeric() {
                at_start = false;
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_lead_in_commentary() {
        assert_eq!(
            sanitize("Here's a summary of the dividends: total income was $50."),
            "Total income was $50."
        );
        assert_eq!(
            sanitize("Based on the data provided, fees totaled $12.50 this period."),
            "Fees totaled $12.50 this period."
        );
        assert_eq!(
            sanitize("In summary, the account grew."),
            "The account grew."
        );
    }

    #[test]
    fn stacked_lead_ins_removed_in_one_pass() {
        assert_eq!(
            sanitize("Here's the summary: based on the statement, trades rose."),
            "Trades rose."
        );
    }

    #[test]
    fn unwraps_markdown_emphasis() {
        assert_eq!(
            sanitize("**Total**: *$100* in `fees`."),
            "Total: $100 in fees."
        );
    }

    #[test]
    fn strips_headings_and_list_markers() {
        assert_eq!(
            sanitize("## Fees\n- commission $5\n> note"),
            "Fees commission $5 note"
        );
    }

    #[test]
    fn never_alters_numeric_values() {
        let out = sanitize("paid  $1,234.56 and 12.5%  on 1,000 shares.");
        assert!(out.contains("$1,234.56"));
        assert!(out.contains("12.5%"));
        assert!(out.contains("1,000"));
    }

    #[test]
    fn fixes_punctuation_spacing() {
        assert_eq!(
            sanitize("trades rose .fees fell.next month"),
            "Trades rose. Fees fell. Next month"
        );
    }

    #[test]
    fn clause_punctuation_gets_trailing_space() {
        assert_eq!(sanitize("fees:commissions and loads"), "Fees: commissions and loads");
    }

    #[test]
    fn decimals_and_thousands_are_untouched_by_punct_rules() {
        assert_eq!(sanitize("net was $9,876.54 total"), "Net was $9,876.54 total");
    }

    #[test]
    fn capitalizes_each_sentence() {
        assert_eq!(
            sanitize("income rose. expenses fell. net was flat."),
            "Income rose. Expenses fell. Net was flat."
        );
    }

    #[test]
    fn empty_input_unchanged() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "Plain sentence with nothing to fix.",
            "Here's a summary: **bold** $1,234.56 gained 4.2%.fees fell",
            "- item one\n- item two\n## heading",
            "based on data, in summary, totals held steady",
            "no terminal punctuation and lowercase start",
        ];
        for s in samples {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once, "not idempotent for {s:?}");
        }
    }
}
