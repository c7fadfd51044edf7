//! Prompt building: serialize a topic's bucket into a bounded prompt.
//!
//! Two thresholds guard the inference call: content below the skip
//! threshold is not worth a network round-trip (the model would only
//! hallucinate around it), and content above the length cap is cut at a
//! deterministic boundary with a visible marker so the model knows the
//! data is incomplete.

use crate::config::SummarizeConfig;
use crate::document::Bucket;
use crate::pipeline::normalize::normalize;
use crate::prompts::{instruction, DATA_MARKER, TRUNCATION_MARKER};
use crate::topic::Topic;

/// Serialize a bucket to one string: tables become tab-separated rows with
/// a blank line between tables; line buckets are newline-joined.
pub fn render_bucket(bucket: &Bucket) -> String {
    match bucket {
        Bucket::Lines(lines) => lines.join("\n"),
        Bucket::Tables(tables) => tables
            .iter()
            .map(|t| t.to_tsv())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Truncate to the first `max_chars` characters, appending the truncation
/// marker. Deterministic: the same content always cuts at the same point.
fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &content[..byte_idx], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

/// Build the complete prompt for a topic, or `None` when the content is too
/// small to summarize (the topic is then skipped outright — no inference
/// call, no summary entry).
///
/// The content is normalized again here: bucket lines were cleaned
/// individually, but table renderings and the joined form have not been.
/// Normalization is idempotent so re-cleaning already-clean text is safe.
pub fn build_prompt(topic: Topic, content: &str, config: &SummarizeConfig) -> Option<String> {
    let cleaned = normalize(content);
    if cleaned.trim().chars().count() < config.min_section_chars {
        return None;
    }

    let bounded = if cleaned.chars().count() > config.max_prompt_chars {
        truncate_content(&cleaned, config.max_prompt_chars)
    } else {
        cleaned
    };

    Some(format!(
        "{}\n\n{}\n{}",
        instruction(topic),
        DATA_MARKER,
        bounded
    ))
}

/// Build the prompt for a bucket (convenience over [`render_bucket`] +
/// [`build_prompt`]).
pub fn build_bucket_prompt(
    topic: Topic,
    bucket: &Bucket,
    config: &SummarizeConfig,
) -> Option<String> {
    build_prompt(topic, &render_bucket(bucket), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Table;

    fn config() -> SummarizeConfig {
        SummarizeConfig::default()
    }

    #[test]
    fn renders_tables_as_tsv_with_blank_line_between() {
        let bucket = Bucket::Tables(vec![
            Table::from_strings(vec![vec!["A", "B"], vec!["1", "2"]]),
            Table::from_strings(vec![vec!["C"]]),
        ]);
        assert_eq!(render_bucket(&bucket), "A\tB\n1\t2\n\nC");
    }

    #[test]
    fn renders_lines_newline_joined() {
        let bucket = Bucket::Lines(vec!["one".into(), "two".into()]);
        assert_eq!(render_bucket(&bucket), "one\ntwo");
    }

    #[test]
    fn skips_below_minimum_length() {
        // 19 stripped characters: skipped.
        let content = "a".repeat(19);
        assert!(build_prompt(Topic::Fees, &content, &config()).is_none());
        // 20: proceeds.
        let content = "a".repeat(20);
        assert!(build_prompt(Topic::Fees, &content, &config()).is_some());
    }

    #[test]
    fn truncation_is_deterministic() {
        let content = "x".repeat(5000);
        let cfg = config();
        let first = build_prompt(Topic::Other, &content, &cfg).unwrap();
        let second = build_prompt(Topic::Other, &content, &cfg).unwrap();
        assert_eq!(first, second);

        let data = first.split("Data to analyze:\n").nth(1).unwrap();
        assert_eq!(
            data.chars().count(),
            4000 + TRUNCATION_MARKER.chars().count()
        );
        assert!(data.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn short_content_is_not_truncated() {
        let content = "dividends were paid on the usual schedule";
        let prompt = build_prompt(Topic::Dividends, content, &config()).unwrap();
        assert!(!prompt.contains(TRUNCATION_MARKER));
        assert!(prompt.contains(content));
    }

    #[test]
    fn prompt_contains_instruction_and_marker() {
        let prompt =
            build_prompt(Topic::Dividends, &"d".repeat(40), &config()).unwrap();
        assert!(prompt.starts_with(instruction(Topic::Dividends)));
        assert!(prompt.contains(DATA_MARKER));
    }

    #[test]
    fn content_is_normalized_before_measuring() {
        // 30 raw chars that normalize down to under the threshold.
        let content = "  *  *  *  *  *  *  *  a  b   ";
        assert!(build_prompt(Topic::Fees, content, &config()).is_none());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let content = "é".repeat(4100);
        let prompt = build_prompt(Topic::Other, &content, &config()).unwrap();
        assert!(prompt.contains(TRUNCATION_MARKER));
    }
}
