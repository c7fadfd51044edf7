//! Document segmentation: walk pages, classify content, build buckets.
//!
//! Segmentation is deliberately sequential across pages: the sticky
//! classification state (see [`crate::pipeline::classify`]) persists over
//! page boundaries, because statement sections routinely run past a page
//! break with the heading only on the first page.

use crate::document::{RawPage, SegmentedDocument};
use crate::error::StatementError;
use crate::pipeline::classify::{classify_line, classify_table};
use crate::pipeline::extract::PageExtractor;
use crate::pipeline::normalize::{normalize, normalize_lines};
use crate::topic::Topic;
use std::path::Path;
use tracing::{debug, info};

/// Segment already-extracted pages into per-topic buckets.
///
/// Pure over its input: classification state starts at [`Topic::Other`]
/// and is threaded through every line of every page in order. The cleaned
/// text of each page is appended to `full_text` whether or not any line
/// matched a topic.
pub fn segment_pages(pages: &[RawPage]) -> SegmentedDocument {
    let mut doc = SegmentedDocument::default();
    let mut state = Topic::Other;

    for (page_num, page) in pages.iter().enumerate() {
        for table in &page.tables {
            let topic = classify_table(table);
            doc.tables.entry(topic).or_default().push(table.clone());
        }

        if page.text.is_empty() {
            continue;
        }

        for line in normalize_lines(&page.text) {
            state = classify_line(state, &line);
            doc.lines.entry(state).or_default().push(line);
        }

        let cleaned = normalize(&page.text);
        if !cleaned.is_empty() {
            if !doc.full_text.is_empty() {
                doc.full_text.push(' ');
            }
            doc.full_text.push_str(&cleaned);
        }

        debug!(
            "segmented page {}: {} tables, ending topic {}",
            page_num + 1,
            page.tables.len(),
            state
        );
    }

    doc
}

/// Drive extraction and segmentation for one document.
///
/// Extraction failure aborts the whole run with a single document-level
/// error; there is no partially segmented result.
pub fn extract_and_segment(
    extractor: &dyn PageExtractor,
    path: &Path,
) -> Result<SegmentedDocument, StatementError> {
    let pages = extractor.extract_pages(path)?;
    info!("statement has {} pages", pages.len());
    Ok(segment_pages(&pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Table;

    fn text_page(text: &str) -> RawPage {
        RawPage {
            text: text.into(),
            tables: Vec::new(),
        }
    }

    #[test]
    fn lines_accumulate_under_sticky_topic() {
        let doc = segment_pages(&[text_page(
            "Dividend income this period\nAAPL $50.00\nBuy 10 shares XYZ",
        )]);
        assert_eq!(
            doc.lines[&Topic::Dividends],
            vec!["Dividend income this period", "AAPL $50.00"]
        );
        assert_eq!(doc.lines[&Topic::Transactions], vec!["Buy 10 shares XYZ"]);
    }

    #[test]
    fn state_persists_across_page_boundaries() {
        let doc = segment_pages(&[
            text_page("Fees and charges"),
            text_page("Wire transfer $25.00"),
        ]);
        assert_eq!(doc.lines[&Topic::Fees].len(), 2);
    }

    #[test]
    fn unmatched_leading_lines_default_to_other() {
        let doc = segment_pages(&[text_page("Statement period January\nDividend detail")]);
        assert_eq!(doc.lines[&Topic::Other], vec!["Statement period January"]);
        assert_eq!(doc.lines[&Topic::Dividends], vec!["Dividend detail"]);
    }

    #[test]
    fn empty_page_text_leaves_buckets_untouched() {
        let doc = segment_pages(&[RawPage::default()]);
        assert!(doc.lines.is_empty());
        assert!(doc.full_text.is_empty());
    }

    #[test]
    fn tables_are_classified_independently_of_line_state() {
        let page = RawPage {
            text: "Dividend summary".into(),
            tables: vec![Table::from_strings(vec![
                vec!["Symbol", "Qty"],
                vec!["AAPL", "10"],
            ])],
        };
        let doc = segment_pages(&[page]);
        assert_eq!(doc.tables[&Topic::Positions].len(), 1);
        assert_eq!(doc.lines[&Topic::Dividends].len(), 1);
    }

    #[test]
    fn full_text_concatenates_cleaned_pages_in_order() {
        let doc = segment_pages(&[text_page("pageOne text"), text_page("page two")]);
        assert_eq!(doc.full_text, "page One text page two");
    }

    #[test]
    fn failing_extractor_aborts_with_extraction_error() {
        struct Failing;
        impl PageExtractor for Failing {
            fn extract_pages(&self, _: &Path) -> Result<Vec<RawPage>, StatementError> {
                Err(StatementError::Extraction {
                    detail: "corrupt file".into(),
                })
            }
        }
        let err = extract_and_segment(&Failing, Path::new("x.pdf")).unwrap_err();
        assert!(err.to_string().contains("corrupt file"));
    }
}
